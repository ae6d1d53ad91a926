//! Per-player in-innings accumulators.

use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::fatigue::Fatigue;
use crate::outcome::Outcome;
use crate::player::{BowlingType, PlayerId};
use std::fmt;

/// How a batter was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissalMode {
    Bowled,
    Lbw,
    Caught,
    CaughtAndBowled,
    RunOut,
    Stumped,
}

/// The full detail of a dismissal: mode plus the bowler/fielder involved.
/// `bowler` is `None` only for a run-out; `fielder` is `Some` only for caught,
/// stumped, and run-out (and never set alongside caught-and-bowled, which has no
/// separate fielder).
#[derive(Debug, Clone, Copy)]
pub struct Dismissal {
    pub mode: DismissalMode,
    pub bowler: Option<PlayerId>,
    pub fielder: Option<PlayerId>,
}

impl Dismissal {
    pub fn new(
        mode: DismissalMode,
        bowler: Option<PlayerId>,
        fielder: Option<PlayerId>,
    ) -> Result<Self> {
        match mode {
            DismissalMode::RunOut => {}
            _ if bowler.is_none() => {
                return Err(Error::InvalidInput(
                    "only a run-out may omit the bowler".into(),
                ))
            }
            _ => {}
        }
        if mode == DismissalMode::CaughtAndBowled && fielder.is_some() {
            return Err(Error::InvalidInput(
                "caught-and-bowled has no separate fielder".into(),
            ));
        }
        Ok(Self {
            mode,
            bowler,
            fielder,
        })
    }
}

impl fmt::Display for Dismissal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            DismissalMode::Bowled => write!(f, "b"),
            DismissalMode::Lbw => write!(f, "lbw"),
            DismissalMode::Caught => write!(f, "c"),
            DismissalMode::CaughtAndBowled => write!(f, "c & b"),
            DismissalMode::RunOut => write!(f, "run out"),
            DismissalMode::Stumped => write!(f, "st"),
        }
    }
}

/// Batting figures for a single innings.
#[derive(Debug, Clone)]
pub struct BatterCard {
    pub player: PlayerId,
    pub runs: u16,
    pub balls: u16,
    pub fours: u16,
    pub sixes: u16,
    pub active: bool,
    pub dismissal: Option<Dismissal>,
}

impl BatterCard {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            active: false,
            dismissal: None,
        }
    }

    pub fn is_out(&self) -> bool {
        self.dismissal.is_some()
    }

    pub fn activate(&mut self) -> Result<()> {
        if self.active {
            return Err(Error::StateViolation(format!(
                "batter {} activated twice",
                self.player
            )));
        }
        self.active = true;
        Ok(())
    }

    /// Apply the batting side of a delivery's outcome.
    pub fn update_score(&mut self, outcome: &Outcome) {
        self.balls += outcome.batter_balls_faced();
        self.runs += outcome.batter_runs();
        if outcome.is_four() {
            self.fours += 1;
        } else if outcome.is_six() {
            self.sixes += 1;
        }
    }

    pub fn dismiss(&mut self, dismissal: Dismissal) -> Result<()> {
        if self.is_out() {
            return Err(Error::StateViolation(format!(
                "batter {} dismissed twice",
                self.player
            )));
        }
        self.dismissal = Some(dismissal);
        Ok(())
    }

    pub fn strike_rate(&self) -> Option<f64> {
        if self.balls == 0 {
            None
        } else {
            Some(100.0 * self.runs as f64 / self.balls as f64)
        }
    }

    /// `"<runs> (<balls>b <fours>x4 <sixes>x6) SR: <sr>"`, matching the scorecard row
    /// format; a "not out" asterisk is added by the scorecard writer, which knows
    /// whether the innings has closed.
    pub fn print_card(&self) -> String {
        let sr = match self.strike_rate() {
            Some(sr) => format!("{:.2}", sr),
            None => "-".to_string(),
        };
        format!(
            "{} ({}b {}x4 {}x6) SR: {}",
            self.runs, self.balls, self.fours, self.sixes, sr
        )
    }
}

impl Outcome {
    /// Legal deliveries and byes/leg-byes add a ball faced; wides do not (the batter
    /// never got a chance to play them), and a no-ball still counts as a ball faced.
    fn batter_balls_faced(&self) -> u16 {
        use crate::outcome::OutcomeKind::*;
        match self.kind {
            Wide => 0,
            _ => 1,
        }
    }
}

/// Categorical bowling workload, used by the bowling manager to rank candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Competency {
    FullTime,
    PartTime,
    Emergency,
}

impl Competency {
    pub fn from_career(balls_bowled: u32, innings_batted: u32) -> Self {
        if innings_batted == 0 {
            return Competency::Emergency;
        }
        let balls_per_innings = balls_bowled as f64 / innings_batted as f64;
        if balls_bowled > 0 && balls_per_innings >= 6.0 {
            Competency::FullTime
        } else if balls_bowled > 0 {
            Competency::PartTime
        } else {
            Competency::Emergency
        }
    }
}

/// Bowling figures for a single innings, plus the fatigue and spell bookkeeping the
/// bowling manager needs to pick the next over.
#[derive(Debug, Clone)]
pub struct BowlerCard {
    pub player: PlayerId,
    pub bowling_type: BowlingType,
    pub competency: Competency,
    pub fatigue: Fatigue,
    pub legal_balls: u32,
    pub overs_completed: u32,
    pub balls_in_current_over: u8,
    pub maidens: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub current_over_is_maiden: bool,
    pub active: bool,
    pub spell_overs: u32,
    pub spell_maidens: u32,
    pub spell_runs: u32,
    pub spell_wickets: u32,
}

impl BowlerCard {
    pub fn new(player: PlayerId, bowling_type: BowlingType, competency: Competency) -> Self {
        Self {
            player,
            bowling_type,
            competency,
            fatigue: Fatigue::default(),
            legal_balls: 0,
            overs_completed: 0,
            balls_in_current_over: 0,
            maidens: 0,
            runs_conceded: 0,
            wickets: 0,
            current_over_is_maiden: true,
            active: false,
            spell_overs: 0,
            spell_maidens: 0,
            spell_runs: 0,
            spell_wickets: 0,
        }
    }

    /// Apply the bowling side of a delivery's outcome.
    pub fn update_score(&mut self, outcome: &Outcome, balls_per_over: u8) {
        let runs = outcome.bowler_runs();
        self.runs_conceded += runs as u32;
        self.spell_runs += runs as u32;
        if runs > 0 {
            self.current_over_is_maiden = false;
        }
        if outcome.is_legal() {
            self.legal_balls += 1;
            self.balls_in_current_over += 1;
            if self.balls_in_current_over == balls_per_over {
                self.overs_completed += 1;
                self.spell_overs += 1;
                self.balls_in_current_over = 0;
                if self.current_over_is_maiden {
                    self.maidens += 1;
                    self.spell_maidens += 1;
                }
                self.current_over_is_maiden = true;
            }
        }
    }

    pub fn record_wicket(&mut self) {
        self.wickets += 1;
        self.spell_wickets += 1;
    }

    pub fn start_new_spell(&mut self) {
        self.active = true;
        self.spell_overs = 0;
        self.spell_maidens = 0;
        self.spell_runs = 0;
        self.spell_wickets = 0;
    }

    pub fn over_rest(&mut self, config: &SimConfig) {
        self.active = false;
        self.fatigue.rest_one_over(config);
    }

    pub fn economy(&self, balls_per_over: u8) -> f64 {
        if self.legal_balls == 0 {
            0.0
        } else {
            self.runs_conceded as f64 * balls_per_over as f64 / self.legal_balls as f64
        }
    }

    pub fn overs_str(&self, balls_per_over: u8) -> String {
        if self.balls_in_current_over == 0 {
            format!("{}", self.overs_completed)
        } else {
            format!("{}.{}", self.overs_completed, self.balls_in_current_over)
        }
    }
}
