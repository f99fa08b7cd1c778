//! Ticket creation when a strategy first matches a match.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::error::DomainError;
use crate::domain::outcome::TargetOutcome;
use crate::domain::snapshot::MatchSnapshot;
use crate::domain::strategy::Strategy;
use crate::domain::ticket::{BetTicket, OddsSource};

/// Opens pending tickets, pricing them from live odds or a fallback.
#[derive(Debug, Clone)]
pub struct TicketFactory {
    fallback_odds: Decimal,
}

impl TicketFactory {
    /// `fallback_odds` must be greater than 1; configuration validates this.
    #[must_use]
    pub fn new(fallback_odds: Decimal) -> Self {
        Self { fallback_odds }
    }

    #[must_use]
    pub fn fallback_odds(&self) -> Decimal {
        self.fallback_odds
    }

    /// Odds for `outcome`: the matching live market when quoted above 1,
    /// otherwise the fallback.
    #[must_use]
    pub fn price(&self, outcome: TargetOutcome, snapshot: &MatchSnapshot) -> (Decimal, OddsSource) {
        let live = outcome
            .odds_market()
            .zip(snapshot.live_odds.as_ref())
            .and_then(|(market, odds)| odds.price(market))
            .filter(|price| *price > Decimal::ONE);
        match live {
            Some(price) => (price, OddsSource::Live),
            None => (self.fallback_odds, OddsSource::Fallback),
        }
    }

    /// Open a pending ticket for `strategy` on `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] if the fallback odds are not
    /// above 1.
    pub fn create(
        &self,
        strategy: &Strategy,
        snapshot: &MatchSnapshot,
        now: DateTime<Utc>,
    ) -> Result<BetTicket, DomainError> {
        let (odds, source) = self.price(strategy.target_outcome(), snapshot);
        BetTicket::open(
            strategy.id().clone(),
            strategy.name(),
            strategy.target_outcome(),
            snapshot,
            odds,
            source,
            now,
        )
    }
}
