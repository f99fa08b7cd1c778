//! Strategy performance derived from settled tickets.
//!
//! [`PerformanceStats`] is never edited in place: it is recomputed from a
//! [`PerformanceTally`], which can be built in one pass over a ticket history
//! or fed tickets one at a time with identical results.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::ticket::{BetTicket, TicketStatus};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rolled-up performance of one strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceStats {
    pub wins: u32,
    pub total_settled: u32,
    /// Percentage of settled tickets won, one decimal place.
    pub strike_rate: Decimal,
    /// Mean odds over settled tickets, two decimal places.
    pub avg_odds: Decimal,
    /// Return on unit stakes in percent, two decimal places.
    pub roi: Decimal,
}

impl PerformanceStats {
    /// Fold a ticket history. Pending tickets are ignored.
    pub fn from_tickets<'a>(tickets: impl IntoIterator<Item = &'a BetTicket>) -> Self {
        let mut tally = PerformanceTally::default();
        for ticket in tickets {
            tally.push(ticket.status(), ticket.odds());
        }
        tally.stats()
    }
}

/// Running sums behind [`PerformanceStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerformanceTally {
    wins: u32,
    settled: u32,
    odds_sum: Decimal,
    won_odds_sum: Decimal,
}

impl PerformanceTally {
    /// Add one ticket. Pending tickets do not count. Sums saturate rather
    /// than overflow on absurd odds.
    pub fn push(&mut self, status: TicketStatus, odds: Decimal) {
        match status {
            TicketStatus::Pending => {}
            TicketStatus::Won => {
                self.wins = self.wins.saturating_add(1);
                self.settled = self.settled.saturating_add(1);
                self.odds_sum = self.odds_sum.saturating_add(odds);
                self.won_odds_sum = self.won_odds_sum.saturating_add(odds);
            }
            TicketStatus::Lost => {
                self.settled = self.settled.saturating_add(1);
                self.odds_sum = self.odds_sum.saturating_add(odds);
            }
        }
    }

    /// Derive rounded statistics; all zero when nothing has settled.
    #[must_use]
    pub fn stats(&self) -> PerformanceStats {
        if self.settled == 0 {
            return PerformanceStats::default();
        }
        let settled = Decimal::from(self.settled);
        let strike_rate = Decimal::from(self.wins) / settled * HUNDRED;
        let roi = (self.won_odds_sum.saturating_sub(settled) / settled).saturating_mul(HUNDRED);
        let avg_odds = self.odds_sum / settled;
        PerformanceStats {
            wins: self.wins,
            total_settled: self.settled,
            strike_rate: round(strike_rate, 1),
            avg_odds: round(avg_odds, 2),
            roi: round(roi, 2),
        }
    }
}

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
