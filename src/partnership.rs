//! Partnership, fall-of-wicket, and extras bookkeeping.

use crate::player::PlayerId;

/// Runs added by the two batters at the crease together, tracked separately from
/// their overall card so a partnership can be reported on its own.
#[derive(Debug, Clone)]
pub struct Partnership {
    /// The batter who was at the crease first when this partnership began.
    pub bat1: PlayerId,
    pub bat2: PlayerId,
    pub bat1_runs: u16,
    pub bat1_balls: u16,
    pub bat2_runs: u16,
    pub bat2_balls: u16,
    /// Set once a wicket ends the partnership.
    pub closed: bool,
}

impl Partnership {
    pub fn new(bat1: PlayerId, bat2: PlayerId) -> Self {
        Self {
            bat1,
            bat2,
            bat1_runs: 0,
            bat1_balls: 0,
            bat2_runs: 0,
            bat2_balls: 0,
            closed: false,
        }
    }

    pub fn runs(&self) -> u16 {
        self.bat1_runs + self.bat2_runs
    }

    pub fn balls(&self) -> u16 {
        self.bat1_balls + self.bat2_balls
    }

    /// Credit a ball faced, and (only for off-the-bat runs — never byes or
    /// leg-byes) the runs scored, to whichever of the two batters faced it.
    pub fn credit_ball(&mut self, striker: PlayerId, runs_off_bat: u16, ball_faced: bool) {
        if striker == self.bat1 {
            if ball_faced {
                self.bat1_balls += 1;
            }
            self.bat1_runs += runs_off_bat;
        } else if striker == self.bat2 {
            if ball_faced {
                self.bat2_balls += 1;
            }
            self.bat2_runs += runs_off_bat;
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

/// Where and when a wicket fell.
#[derive(Debug, Clone, Copy)]
pub struct FallOfWicket {
    pub batter: PlayerId,
    /// Count of wickets fallen at the moment this entry was recorded (the first
    /// wicket of an innings records 1, not 0).
    pub wicket_number: u8,
    pub team_score: u16,
    pub overs_completed: u16,
    pub balls_in_over: u8,
}

/// Extra runs not credited to any batter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extras {
    pub byes: u16,
    pub legbyes: u16,
    pub noballs: u16,
    pub wides: u16,
}

impl Extras {
    pub fn total(&self) -> u16 {
        self.byes + self.legbyes + self.noballs + self.wides
    }

    pub fn apply(&mut self, outcome: &crate::outcome::Outcome) {
        use crate::outcome::OutcomeKind::*;
        match outcome.kind {
            Bye => self.byes += outcome.runs as u16,
            LegBye => self.legbyes += outcome.runs as u16,
            // `outcome.runs` is the total conceded including the 1-run penalty; the
            // rest is the batter's off-bat runs, credited via BatterCard::update_score
            // instead, so only the penalty itself goes to extras here.
            NoBall => self.noballs += 1,
            Wide => self.wides += outcome.runs as u16,
            Runs | Wicket => {}
        }
    }
}
