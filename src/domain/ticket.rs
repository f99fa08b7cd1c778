//! Bet tickets: one per (strategy, match) trigger, settled exactly once.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{MatchId, StrategyId, TicketId};
use super::outcome::TargetOutcome;
use super::snapshot::{MatchSnapshot, Score};

/// Lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Pending,
    Won,
    Lost,
}

impl TicketStatus {
    /// Returns true once the ticket has left `Pending`.
    #[must_use]
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Won => "WON",
            Self::Lost => "LOST",
        };
        f.write_str(s)
    }
}

/// Terminal result of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Won,
    Lost,
}

impl From<Verdict> for TicketStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Won => Self::Won,
            Verdict::Lost => Self::Lost,
        }
    }
}

/// Where the odds recorded on a ticket came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddsSource {
    /// The live market matching the target outcome.
    Live,
    /// The configured fallback price.
    #[default]
    Fallback,
}

/// Facts stamped on a ticket when it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub verdict: Verdict,
    pub at: DateTime<Utc>,
    pub ht_score: Option<Score>,
    pub ft_score: Option<Score>,
    pub score: Option<Score>,
}

/// A wager recorded when a strategy triggers on a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetTicket {
    id: TicketId,
    strategy_id: StrategyId,
    #[serde(default)]
    strategy_name: String,
    match_id: MatchId,
    #[serde(default)]
    home_team: String,
    #[serde(default)]
    away_team: String,
    target_outcome: TargetOutcome,
    triggered_at: DateTime<Utc>,
    #[serde(default)]
    minute_at_trigger: u32,
    initial_score: Option<Score>,
    odds_at_trigger: Decimal,
    #[serde(default)]
    odds_source: OddsSource,
    snapshot: MatchSnapshot,
    status: TicketStatus,
    #[serde(default)]
    settled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    ht_score: Option<Score>,
    #[serde(default)]
    ft_score: Option<Score>,
    #[serde(default)]
    score_at_result: Option<Score>,
}

impl BetTicket {
    /// Open a pending ticket from the snapshot that triggered it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] unless `odds > 1`.
    pub fn open(
        strategy_id: StrategyId,
        strategy_name: impl Into<String>,
        target_outcome: TargetOutcome,
        snapshot: &MatchSnapshot,
        odds: Decimal,
        odds_source: OddsSource,
        triggered_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if odds <= Decimal::ONE {
            return Err(DomainError::InvalidOdds { odds });
        }
        Ok(Self {
            id: TicketId::new(),
            strategy_id,
            strategy_name: strategy_name.into(),
            match_id: snapshot.id.clone(),
            home_team: snapshot.home_team.clone(),
            away_team: snapshot.away_team.clone(),
            target_outcome,
            triggered_at,
            minute_at_trigger: snapshot.minute,
            initial_score: snapshot.score(),
            odds_at_trigger: odds,
            odds_source,
            snapshot: snapshot.clone(),
            status: TicketStatus::Pending,
            settled_at: None,
            ht_score: None,
            ft_score: None,
            score_at_result: None,
        })
    }

    /// Move the ticket to its terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AlreadySettled`] if the ticket is not pending.
    pub fn settle(&mut self, settlement: Settlement) -> Result<(), DomainError> {
        if self.status.is_settled() {
            return Err(DomainError::AlreadySettled {
                ticket_id: self.id.clone(),
                status: self.status,
            });
        }
        self.status = settlement.verdict.into();
        self.settled_at = Some(settlement.at);
        self.ht_score = settlement.ht_score;
        self.ft_score = settlement.ft_score;
        self.score_at_result = settlement.score;
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &TicketId {
        &self.id
    }

    #[must_use]
    pub fn strategy_id(&self) -> &StrategyId {
        &self.strategy_id
    }

    #[must_use]
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    #[must_use]
    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    #[must_use]
    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    #[must_use]
    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    #[must_use]
    pub fn target_outcome(&self) -> TargetOutcome {
        self.target_outcome
    }

    #[must_use]
    pub fn triggered_at(&self) -> DateTime<Utc> {
        self.triggered_at
    }

    #[must_use]
    pub fn minute_at_trigger(&self) -> u32 {
        self.minute_at_trigger
    }

    /// Score when the strategy triggered, if goals were reported.
    #[must_use]
    pub fn initial_score(&self) -> Option<Score> {
        self.initial_score
    }

    #[must_use]
    pub fn odds(&self) -> Decimal {
        self.odds_at_trigger
    }

    #[must_use]
    pub fn odds_source(&self) -> OddsSource {
        self.odds_source
    }

    /// Full snapshot captured at trigger time.
    #[must_use]
    pub fn snapshot(&self) -> &MatchSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn status(&self) -> TicketStatus {
        self.status
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.status.is_settled()
    }

    #[must_use]
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }

    #[must_use]
    pub fn ht_score(&self) -> Option<Score> {
        self.ht_score
    }

    #[must_use]
    pub fn ft_score(&self) -> Option<Score> {
        self.ft_score
    }

    #[must_use]
    pub fn score_at_result(&self) -> Option<Score> {
        self.score_at_result
    }
}
