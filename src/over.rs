//! The ball-by-ball record of an innings.
//!
//! Overs and deliveries form a plain forward-only chain with no back-references or
//! cycles, so a `Vec<Over>` of `Vec<Ball>` suffices; `Innings` owns the whole chain
//! directly instead of walking head/tail pointers.

use crate::outcome::Outcome;
use crate::player::PlayerId;

/// One delivery. Immutable once recorded.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub bowler: PlayerId,
    pub batter: PlayerId,
    pub outcome: Outcome,
}

/// All deliveries bowled in one over, in order.
#[derive(Debug, Clone, Default)]
pub struct Over {
    pub index: u16,
    pub balls: Vec<Ball>,
}

impl Over {
    pub fn new(index: u16) -> Self {
        Self {
            index,
            balls: Vec::with_capacity(6),
        }
    }

    pub fn record(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    pub fn legal_deliveries(&self) -> u8 {
        self.balls.iter().filter(|b| b.outcome.is_legal()).count() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.legal_deliveries() >= 6
    }
}
