//! Simulated match feed for demos and smoke runs.
//!
//! Keeps a fixed number of fixtures in play. Every fetch advances each one
//! by a few minutes, rolling goals, corners, shots and cards at realistic
//! per-minute rates. Finished fixtures are reported once at full time and
//! then replaced by a new kick-off.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::domain::snapshot::{MatchOdds, MatchPhase, MatchSnapshot, PreMatchTeamStats, TeamStats};
use crate::error::Result;
use crate::port::outbound::feed::MatchFeed;

const MINUTES_PER_FETCH: u32 = 3;

const LEAGUES: &[(&str, &str, &[&str])] = &[
    (
        "Premier League",
        "England",
        &["Arsenal", "Aston Villa", "Brentford", "Brighton", "Chelsea", "Everton", "Fulham", "Liverpool", "Newcastle", "Tottenham"],
    ),
    (
        "La Liga",
        "Spain",
        &["Real Madrid", "Barcelona", "Girona", "Athletic Club", "Real Sociedad", "Betis", "Valencia", "Getafe"],
    ),
    (
        "Serie A",
        "Italy",
        &["Inter", "Juventus", "Milan", "Atalanta", "Roma", "Bologna", "Napoli", "Lazio"],
    ),
    (
        "Bundesliga",
        "Germany",
        &["Leverkusen", "Bayern", "Stuttgart", "Dortmund", "Leipzig", "Frankfurt", "Freiburg", "Augsburg"],
    ),
];

struct Simulation {
    rng: StdRng,
    matches: Vec<MatchSnapshot>,
    next_id: u64,
}

impl Simulation {
    fn kick_off(&mut self) -> MatchSnapshot {
        let (league, country, teams) = LEAGUES[self.rng.gen_range(0..LEAGUES.len())];
        let home = self.rng.gen_range(0..teams.len());
        let mut away = self.rng.gen_range(0..teams.len() - 1);
        if away >= home {
            away += 1;
        }

        self.next_id += 1;
        let mut snapshot = MatchSnapshot::new(format!("demo-{}", self.next_id), MatchPhase::Scheduled, 0);
        snapshot.league = league.to_string();
        snapshot.country = country.to_string();
        snapshot.home_team = teams[home].to_string();
        snapshot.away_team = teams[away].to_string();
        snapshot.stats.home = fresh_stats();
        snapshot.stats.away = fresh_stats();
        snapshot.pre_match.home = pre_match(&mut self.rng);
        snapshot.pre_match.away = pre_match(&mut self.rng);
        snapshot.pre_match.odds = Some(odds(&mut self.rng));
        snapshot.live_odds = snapshot.pre_match.odds.clone();
        snapshot
    }

    fn advance(&mut self) -> Vec<MatchSnapshot> {
        let mut matches = std::mem::take(&mut self.matches);
        for snapshot in &mut matches {
            if snapshot.phase.is_finished() {
                *snapshot = self.kick_off();
            }
            step(&mut self.rng, snapshot);
        }
        self.matches = matches;
        self.matches.clone()
    }
}

fn fresh_stats() -> TeamStats {
    TeamStats {
        goals: Some(0),
        goals_first_half: Some(0),
        corners: Some(0),
        corners_first_half: Some(0),
        shots_on_target: Some(0),
        shots_off_target: Some(0),
        attacks: Some(0),
        dangerous_attacks: Some(0),
        possession: Some(Decimal::from(50)),
        yellow_cards: Some(0),
        red_cards: Some(0),
        expected_goals: Some(Decimal::ZERO),
    }
}

fn pre_match(rng: &mut StdRng) -> PreMatchTeamStats {
    let scored: i64 = rng.gen_range(50..300);
    let conceded: i64 = rng.gen_range(50..250);
    PreMatchTeamStats {
        avg_goals_scored: Some(Decimal::new(scored, 2)),
        avg_goals_conceded: Some(Decimal::new(conceded, 2)),
        avg_corners: Some(Decimal::new(rng.gen_range(200..800), 2)),
        btts_percentage: Some(Decimal::from(rng.gen_range(20..100_i64))),
        over_2_5_percentage: Some(Decimal::from(rng.gen_range(20..100_i64))),
        points_per_game: Some(Decimal::new(rng.gen_range(50..300), 2)),
        league_position: Some(rng.gen_range(1..21)),
        clean_sheet_percentage: Some(Decimal::from(rng.gen_range(10..60_i64))),
        failed_to_score_percentage: Some(Decimal::from(rng.gen_range(5..45_i64))),
        avg_first_half_goals_for: Some(Decimal::new(scored * 4, 3)),
        avg_second_half_goals_for: Some(Decimal::new(scored * 6, 3)),
        avg_first_half_goals_against: Some(Decimal::new(conceded * 45, 4)),
        avg_second_half_goals_against: Some(Decimal::new(conceded * 55, 4)),
        avg_minute_first_goal_scored: Some(Decimal::from(rng.gen_range(10..60_i64))),
        avg_minute_first_goal_conceded: Some(Decimal::from(rng.gen_range(10..60_i64))),
        last_5_form: Some((0..5).map(|_| ['W', 'D', 'L'][rng.gen_range(0..3)]).collect()),
    }
}

fn odds(rng: &mut StdRng) -> MatchOdds {
    let mut price = |low: i64, spread: i64| Some(Decimal::new(low + rng.gen_range(0..spread), 2));
    MatchOdds {
        home_win: price(120, 300),
        draw: price(250, 200),
        away_win: price(150, 400),
        over_2_5: price(140, 100),
        under_2_5: price(160, 100),
        btts_yes: price(150, 100),
    }
}

fn bump(value: &mut Option<u32>, by: u32) {
    *value = Some(value.unwrap_or(0) + by);
}

/// Advance one fixture by [`MINUTES_PER_FETCH`] minutes.
fn step(rng: &mut StdRng, snapshot: &mut MatchSnapshot) {
    match snapshot.phase {
        MatchPhase::Scheduled => {
            snapshot.phase = MatchPhase::Live;
            snapshot.minute = 1;
            return;
        }
        MatchPhase::HalfTime => {
            snapshot.phase = MatchPhase::Live;
            snapshot.minute = 46;
            return;
        }
        MatchPhase::Live => {}
        _ => return,
    }

    let first_half = snapshot.minute <= 45;
    for _ in 0..MINUTES_PER_FETCH {
        for stats in [&mut snapshot.stats.home, &mut snapshot.stats.away] {
            bump(&mut stats.attacks, rng.gen_range(0..3));
            bump(&mut stats.dangerous_attacks, rng.gen_range(0..2));
            if rng.gen_bool(0.14) {
                bump(&mut stats.shots_off_target, 1);
            }
            if rng.gen_bool(0.09) {
                bump(&mut stats.shots_on_target, 1);
                let xg = stats.expected_goals.unwrap_or_default();
                stats.expected_goals = Some(xg + Decimal::new(rng.gen_range(3..35), 2));
            }
            if rng.gen_bool(0.015) {
                bump(&mut stats.goals, 1);
                if first_half {
                    bump(&mut stats.goals_first_half, 1);
                }
            }
            if rng.gen_bool(0.055) {
                bump(&mut stats.corners, 1);
                if first_half {
                    bump(&mut stats.corners_first_half, 1);
                }
            }
            if rng.gen_bool(0.02) {
                bump(&mut stats.yellow_cards, 1);
            }
            if rng.gen_bool(0.002) {
                bump(&mut stats.red_cards, 1);
            }
        }
        let home_share: i64 = rng.gen_range(35..66);
        snapshot.stats.home.possession = Some(Decimal::from(home_share));
        snapshot.stats.away.possession = Some(Decimal::from(100 - home_share));
    }

    snapshot.minute += MINUTES_PER_FETCH;
    if first_half && snapshot.minute >= 45 {
        snapshot.minute = 45;
        snapshot.phase = MatchPhase::HalfTime;
    } else if snapshot.minute >= 90 {
        snapshot.minute = 90;
        snapshot.phase = MatchPhase::FullTime;
    }
}

/// Randomised but reproducible live feed.
pub struct DemoFeed {
    simulation: Mutex<Simulation>,
}

impl DemoFeed {
    /// Simulate `matches` concurrent fixtures. The same `seed` always
    /// produces the same sequence of batches.
    #[must_use]
    pub fn new(matches: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut simulation = Simulation {
            rng,
            matches: Vec::with_capacity(matches),
            next_id: 0,
        };
        for _ in 0..matches {
            let mut snapshot = simulation.kick_off();
            // Stagger kick-offs so fixtures are at different stages.
            let warmup: u32 = simulation.rng.gen_range(0..30);
            for _ in 0..warmup {
                step(&mut simulation.rng, &mut snapshot);
            }
            simulation.matches.push(snapshot);
        }
        Self {
            simulation: Mutex::new(simulation),
        }
    }
}

#[async_trait]
impl MatchFeed for DemoFeed {
    async fn fetch(&self) -> Result<Vec<MatchSnapshot>> {
        Ok(self.simulation.lock().advance())
    }
}
