//! Conditions of a match, independent of the players.

use serde::{Deserialize, Serialize};

/// How helpful the pitch is to seam and spin bowling, each on [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PitchFactors {
    pub seam: f64,
    pub spin: f64,
}

impl Default for PitchFactors {
    fn default() -> Self {
        Self {
            seam: 0.5,
            spin: 0.5,
        }
    }
}

/// Where the match is played. Only the pitch factors currently influence the
/// simulation; the name is carried through to the scorecard.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Venue {
    pub name: String,
    pub pitch: PitchFactors,
}

impl Venue {
    pub fn new(name: impl Into<String>, pitch: PitchFactors) -> Self {
        Self {
            name: name.into(),
            pitch,
        }
    }
}
