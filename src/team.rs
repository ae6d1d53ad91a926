//! Teams of players

use crate::error::{Error, Result};
use crate::player::Player;

pub const SIDE_SIZE: usize = 11;

/// Eleven players and the roles within them needed to drive the simulation:
/// who captains, who keeps, and who opens the bowling from each end.
#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    pub captain: usize,
    pub wicketkeeper: usize,
    pub opening_bowlers: (usize, usize),
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        players: Vec<Player>,
        captain: usize,
        wicketkeeper: usize,
        opening_bowlers: (usize, usize),
    ) -> Result<Self> {
        if players.len() != SIDE_SIZE {
            return Err(Error::InvalidInput(format!(
                "a team must have exactly {} players, got {}",
                SIDE_SIZE,
                players.len()
            )));
        }
        let indices = [captain, wicketkeeper, opening_bowlers.0, opening_bowlers.1];
        if indices.iter().any(|&i| i >= SIDE_SIZE) {
            return Err(Error::InvalidInput(
                "role index out of range for an 11-player lineup".into(),
            ));
        }
        let mut sorted_indices = indices;
        sorted_indices.sort_unstable();
        if sorted_indices.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::InvalidInput(
                "captain, wicketkeeper, and opening bowler indices must be pairwise distinct"
                    .into(),
            ));
        }
        Ok(Self {
            name: name.into(),
            players,
            captain,
            wicketkeeper,
            opening_bowlers,
        })
    }

    pub fn batting_order(&self) -> BattingOrder<'_> {
        let n_batters = self.players.len();
        let remaining: Vec<usize> = (0..n_batters).rev().collect();
        BattingOrder {
            batters: &self.players,
            remaining,
        }
    }
}

/// Tracks the batting order. This must be able to change mid-game to adjust strategy
/// (only for batters who have not yet batted, of course).
pub struct BattingOrder<'a> {
    /// The reference list of players
    batters: &'a [Player],
    /// Indices of remaining batters in reverse order. (This allows for convenient
    /// popping.)
    remaining: Vec<usize>,
}

impl<'a> Iterator for BattingOrder<'a> {
    type Item = &'a Player;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining.pop().map(|i| &self.batters[i])
    }
}
