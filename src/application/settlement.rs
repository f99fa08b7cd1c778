//! Ticket settlement: decide WON or LOST from the latest snapshot.
//!
//! Each outcome family has its own rule for when a verdict is reachable:
//!
//! - over-lines win as soon as the total passes the line
//! - under-lines lose on breach and only win once the match has finished
//! - result markets wait for a finished phase
//! - half-time markets are decided at the break from first-half figures
//! - next-goal compares the score against the score at trigger
//!
//! A ticket with no verdict when its match finishes is lost. Missing data
//! never settles a ticket any other way.

use chrono::{DateTime, Utc};

use crate::domain::outcome::{Direction, Line, OutcomeRule};
use crate::domain::snapshot::{MatchSnapshot, Score, Side};
use crate::domain::ticket::{BetTicket, Settlement, Verdict};

/// Verdict for a pending ticket given the current snapshot, if one is
/// reachable yet. Does not apply the finish fallback.
#[must_use]
pub fn verdict(ticket: &BetTicket, snapshot: &MatchSnapshot) -> Option<Verdict> {
    let finished = snapshot.phase.is_finished();
    match ticket.target_outcome().rule() {
        OutcomeRule::MatchResult(pick) => {
            if !finished {
                return None;
            }
            snapshot.score().map(|score| won_if(pick.matches(score)))
        }
        OutcomeRule::HalfTimeResult(pick) => {
            half_time_figures(snapshot, snapshot.half_time_score())
                .map(|score| won_if(pick.matches(score)))
        }
        OutcomeRule::Goals { line, direction } => {
            line_verdict(snapshot.score().and_then(|s| s.total()), line, direction, finished)
        }
        OutcomeRule::HalfTimeGoals { line, direction } => {
            half_time_figures(snapshot, snapshot.half_time_score())
                .and_then(|score| line_verdict(score.total(), line, direction, true))
        }
        OutcomeRule::Corners { line, direction } => {
            line_verdict(snapshot.total_corners(), line, direction, finished)
        }
        OutcomeRule::HalfTimeCorners { line, direction } => {
            half_time_figures(snapshot, snapshot.first_half_corners())
                .and_then(|total| line_verdict(Some(total), line, direction, true))
        }
        OutcomeRule::BothTeamsToScore => {
            let score = snapshot.score()?;
            (score.home > 0 && score.away > 0).then_some(Verdict::Won)
        }
        OutcomeRule::NextGoal(side) => next_goal(side, ticket.initial_score()?, snapshot.score()?),
    }
}

/// Settlement for a pending ticket, including the finish fallback.
///
/// Returns `None` while the ticket should stay pending.
#[must_use]
pub fn resolve(ticket: &BetTicket, snapshot: &MatchSnapshot, at: DateTime<Utc>) -> Option<Settlement> {
    let finished = snapshot.phase.is_finished();
    let verdict = verdict(ticket, snapshot).or(finished.then_some(Verdict::Lost))?;
    let score = snapshot.score();
    Some(Settlement {
        verdict,
        at,
        ht_score: snapshot.half_time_score(),
        ft_score: if finished { score } else { None },
        score,
    })
}

fn won_if(condition: bool) -> Verdict {
    if condition {
        Verdict::Won
    } else {
        Verdict::Lost
    }
}

/// First-half figures become final at the break. A finished match that
/// still reports them settles a ticket whose break was never observed.
fn half_time_figures<T>(snapshot: &MatchSnapshot, figures: Option<T>) -> Option<T> {
    if snapshot.phase.is_half_time() || snapshot.phase.is_finished() {
        figures
    } else {
        None
    }
}

/// Over/under against a line. `complete` means the total can no longer grow.
fn line_verdict(total: Option<u32>, line: Line, direction: Direction, complete: bool) -> Option<Verdict> {
    let exceeded = line.exceeded_by(total?);
    match (direction, exceeded) {
        (Direction::Over, true) => Some(Verdict::Won),
        (Direction::Under, true) => Some(Verdict::Lost),
        (Direction::Over, false) if complete => Some(Verdict::Lost),
        (Direction::Under, false) if complete => Some(Verdict::Won),
        _ => None,
    }
}

/// Only the picked side scoring wins. If both sides scored since the
/// trigger the order is unknown, which counts as a loss.
fn next_goal(side: Side, initial: Score, current: Score) -> Option<Verdict> {
    let picked = current.side(side) > initial.side(side);
    let other_side = match side {
        Side::Home => Side::Away,
        Side::Away => Side::Home,
    };
    let other = current.side(other_side) > initial.side(other_side);
    match (picked, other) {
        (true, false) => Some(Verdict::Won),
        (_, true) => Some(Verdict::Lost),
        (false, false) => None,
    }
}
