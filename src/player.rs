//! Player data and identification

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

pub type PlayerId = usize;
static PLAYER_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Retrieve a new unique player ID
fn get_new_player_id() -> PlayerId {
    // NOTE: This choice of ordering hasn't been considered.
    PLAYER_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Which hand a player bats or bowls with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Hand {
    Left,
    Right,
}

/// Broad category of bowling action, used by the bowling and outcome models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BowlingType {
    Medium,
    MediumFast,
    FastMedium,
    Fast,
    Offbreak,
    Legbreak,
}

impl BowlingType {
    /// Slow bowlers are the spin types; everything else is pace.
    pub fn is_slow(&self) -> bool {
        matches!(self, BowlingType::Offbreak | BowlingType::Legbreak)
    }
}

/// Career aggregates used by stats-driven outcome models and bowler competency ranking.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CareerStats {
    pub innings_batted: u32,
    pub batting_average: f64,
    pub batting_strike_rate: f64,
    pub balls_bowled: u32,
    pub bowling_average: f64,
    pub bowling_strike_rate: f64,
    pub bowling_economy: f64,
}

impl Default for CareerStats {
    fn default() -> Self {
        Self {
            innings_batted: 0,
            batting_average: 25.0,
            batting_strike_rate: 45.0,
            balls_bowled: 0,
            bowling_average: 35.0,
            bowling_strike_rate: 60.0,
            bowling_economy: 3.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Player {
    #[serde(skip, default = "get_new_player_id")]
    pub id: PlayerId,
    pub name: String,
    pub initials: String,
    pub batting_hand: Hand,
    pub bowling_arm: Hand,
    pub bowling_type: BowlingType,
    pub career: CareerStats,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        initials: impl Into<String>,
        batting_hand: Hand,
        bowling_arm: Hand,
        bowling_type: BowlingType,
        career: CareerStats,
    ) -> Self {
        Self {
            id: get_new_player_id(),
            name: name.into(),
            initials: initials.into(),
            batting_hand,
            bowling_arm,
            bowling_type,
            career,
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Player {}

pub struct PlayerDb {
    map: FnvHashMap<PlayerId, Player>,
}

impl Default for PlayerDb {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerDb {
    pub fn new() -> Self {
        Self {
            map: FnvHashMap::default(),
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.map.get(&id)
    }

    pub fn add(&mut self, player: Player) -> crate::error::Result<&Player> {
        let id = player.id;
        if self.map.insert(id, player).is_some() {
            return Err(crate::error::Error::DuplicatePlayerId(id));
        }
        Ok(self.map.get(&id).unwrap())
    }
}
