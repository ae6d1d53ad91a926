//! A model that doesn't depend on any player data: fixed league-average weights.

use super::{DeliverySnapshot, OutcomeModel};

/// Flat probabilities, uninfluenced by who's at the crease. Useful as a baseline
/// and in tests where determinism matters more than realism.
pub struct NullModel;

impl OutcomeModel for NullModel {
    fn outcome_weights(&self, _snapshot: &DeliverySnapshot<'_>) -> Vec<(String, f64)> {
        vec![
            ("0".to_string(), 0.36),
            ("1".to_string(), 0.30),
            ("2".to_string(), 0.08),
            ("3".to_string(), 0.02),
            ("4".to_string(), 0.10),
            ("5".to_string(), 0.002),
            ("6".to_string(), 0.02),
            ("W".to_string(), 0.02),
            ("1nb".to_string(), 0.012),
            ("1w".to_string(), 0.018),
            ("1b".to_string(), 0.01),
            ("1lb".to_string(), 0.01),
        ]
    }
}
