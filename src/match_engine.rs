//! Sequences up to four innings, toss and follow-on, into a match result.
//!
//! Named `match_engine` rather than `match` because the latter is a reserved word.

use crate::conditions::Venue;
use crate::config::SimConfig;
use crate::error::Result;
use crate::innings::{CloseReason, Innings};
use crate::outcome_model::OutcomeModel;
use crate::team::Team;
use rand::Rng;
use tracing::{debug, info};

/// Which of the two teams passed to [`Match::new`] this refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossChoice {
    Bat,
    Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toss {
    pub winner: Side,
    pub choice: TossChoice,
}

/// How the match finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Winner dismissed the loser twice (or once, on a one-innings-per-side match
    /// decided by a follow-on) without needing to bat a second time.
    WinByInnings { winner: Side, margin: u32 },
    /// Winner bowled the loser out in the last innings while still ahead.
    WinByRuns { winner: Side, margin: u32 },
    /// Winner chased down the target with wickets in hand.
    WinByWickets { winner: Side, wickets: u8 },
    Tie,
    Draw,
}

/// Monotone in pitch spin: tracks that will break up for spin as the match wears on
/// reward batting first, so the probability of electing to field falls as spin rises.
fn toss_elect_field_probability(spin: f64) -> f64 {
    (0.6 - 0.4 * spin).clamp(0.05, 0.95)
}

pub struct Match<'a> {
    pub team_a: &'a Team,
    pub team_b: &'a Team,
    pub venue: Venue,
    config: &'a SimConfig,
    model: &'a dyn OutcomeModel,
    pub toss: Toss,
    pub innings: Vec<Innings<'a>>,
    pub result: Option<MatchResult>,
}

impl<'a> Match<'a> {
    pub fn new(
        team_a: &'a Team,
        team_b: &'a Team,
        venue: Venue,
        config: &'a SimConfig,
        model: &'a dyn OutcomeModel,
        rng: &mut impl Rng,
    ) -> Self {
        let toss = Self::simulate_toss(venue.pitch.spin, rng);
        info!(
            winner = ?toss.winner,
            choice = ?toss.choice,
            venue = %venue.name,
            "toss decided"
        );
        Self {
            team_a,
            team_b,
            venue,
            config,
            model,
            toss,
            innings: Vec::new(),
            result: None,
        }
    }

    fn simulate_toss(spin: f64, rng: &mut impl Rng) -> Toss {
        let winner = if rng.gen_bool(0.5) { Side::A } else { Side::B };
        let choice = if rng.gen_bool(toss_elect_field_probability(spin)) {
            TossChoice::Field
        } else {
            TossChoice::Bat
        };
        Toss { winner, choice }
    }

    fn side_team(&self, side: Side) -> &'a Team {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    /// Plays every innings in sequence until a result is reached.
    pub fn simulate(&mut self, rng: &mut impl Rng) -> Result<MatchResult> {
        let mut batting_side = match self.toss.choice {
            TossChoice::Bat => self.toss.winner,
            TossChoice::Field => self.toss.winner.other(),
        };

        let total_innings = 2 * self.config.innings_per_side;
        let mut starting_lead: i32 = 0;
        let mut inns_no: u8 = 1;

        loop {
            let batting_team = self.side_team(batting_side);
            let bowling_team = self.side_team(batting_side.other());
            let mut innings = Innings::new(
                batting_team,
                bowling_team,
                self.config,
                self.venue.pitch,
                self.model,
                inns_no,
                starting_lead,
                rng,
            )?;
            let reason = innings.simulate(rng)?;
            let closing_lead = innings.lead;
            let closing_wkts = innings.wkts;
            debug!(
                inns_no,
                side = ?batting_side,
                score = innings.team_score,
                wkts = closing_wkts,
                lead = closing_lead,
                reason = ?reason,
                "innings closed"
            );
            self.innings.push(innings);

            // The innings in which the side that batted first bats again, whether it
            // got there via a follow-on or the normal alternation. If it closes all
            // out still trailing, the other side never needs a second innings.
            if inns_no == self.config.innings_per_side + 1
                && reason == CloseReason::AllOut
                && closing_lead < 0
            {
                self.result = Some(MatchResult::WinByInnings {
                    winner: batting_side.other(),
                    margin: (-closing_lead) as u32,
                });
                break;
            }

            if inns_no == total_innings {
                self.result = Some(Self::determine_result(
                    batting_side,
                    reason,
                    closing_lead,
                    closing_wkts,
                ));
                break;
            }

            if inns_no == self.config.innings_per_side {
                let trails_enough = closing_lead <= -self.config.follow_on_deficit;
                let enforced = trails_enough
                    && rng.gen_bool(self.config.follow_on_probability.clamp(0.0, 1.0));
                if enforced {
                    debug!(deficit = -closing_lead, "follow-on enforced");
                    inns_no += 1;
                    starting_lead = closing_lead;
                    continue;
                }
            }

            inns_no += 1;
            starting_lead = -closing_lead;
            batting_side = batting_side.other();
        }

        info!(result = ?self.result, "match finished");
        Ok(self.result.expect("result set before the loop broke"))
    }

    /// Reads the final scheduled innings' close reason against the standing lead to
    /// settle the match. Early innings-margin finishes are caught before this runs.
    fn determine_result(
        batting_side: Side,
        reason: CloseReason,
        lead: i32,
        wkts: u8,
    ) -> MatchResult {
        match reason {
            CloseReason::Win => MatchResult::WinByWickets {
                winner: batting_side,
                wickets: 10 - wkts,
            },
            CloseReason::AllOut => {
                if lead == 0 {
                    MatchResult::Tie
                } else {
                    // lead > 0 on the final innings would have already closed via
                    // `Win` above, so only the trailing case reaches here.
                    MatchResult::WinByRuns {
                        winner: batting_side.other(),
                        margin: (-lead) as u32,
                    }
                }
            }
            CloseReason::Declared | CloseReason::Draw => MatchResult::Draw,
        }
    }
}
