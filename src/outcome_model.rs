//! The interface for pluggable delivery outcome models.

use crate::card::{BatterCard, BowlerCard};
use crate::conditions::PitchFactors;
use crate::player::Player;

pub mod naive_stats;
pub mod null;

pub use naive_stats::NaiveStatsModel;
pub use null::NullModel;

/// Everything an outcome model is allowed to look at when weighing a delivery.
/// Deliberately read-only: the model never mutates the cards it's shown.
pub struct DeliverySnapshot<'a> {
    pub striker: &'a Player,
    pub striker_card: &'a BatterCard,
    pub bowler: &'a Player,
    pub bowler_card: &'a BowlerCard,
    pub pitch: &'a PitchFactors,
    pub overs_elapsed: u16,
}

/// Produces a probability map over the outcome symbol grammar for the next
/// delivery. The engine samples from the returned weights and parses the result
/// into a structured [`crate::outcome::Outcome`]; the model never constructs one
/// itself, keeping the string grammar confined to this boundary.
pub trait OutcomeModel {
    fn outcome_weights(&self, snapshot: &DeliverySnapshot<'_>) -> Vec<(String, f64)>;
}
