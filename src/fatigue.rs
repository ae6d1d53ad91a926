//! Per-bowler fatigue accumulation.

use crate::config::SimConfig;
use crate::player::BowlingType;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A non-negative scalar that rises with overs bowled and decays with rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Fatigue(f64);

impl Fatigue {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Record one ball bowled by a bowler of the given type.
    pub fn ball_bowled(&mut self, bowling_type: BowlingType, config: &SimConfig, rng: &mut impl Rng) {
        let (mean, var) = if bowling_type.is_slow() {
            (config.spin_fatigue_mean, config.spin_fatigue_variance)
        } else {
            (config.pace_fatigue_mean, config.pace_fatigue_variance)
        };
        let normal = Normal::new(mean, var.sqrt()).expect("variance must be non-negative");
        let sample = normal.sample(rng);
        self.0 = (self.0 + sample).max(0.0);
    }

    /// Relief applied immediately after taking a wicket.
    pub fn wicket_taken(&mut self, config: &SimConfig) {
        self.0 = (self.0 - config.wicket_fatigue_relief).max(0.0);
    }

    /// Decay fatigue for one over spent resting at the other end.
    pub fn rest_one_over(&mut self, config: &SimConfig) {
        self.0 = (self.0 - config.rest_decay_per_over).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fatigue_never_goes_negative() {
        let config = SimConfig::default();
        let mut fatigue = Fatigue::default();
        fatigue.rest_one_over(&config);
        assert_eq!(fatigue.value(), 0.0);
    }

    #[test]
    fn bowling_increases_fatigue_on_average() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut fatigue = Fatigue::default();
        for _ in 0..600 {
            fatigue.ball_bowled(BowlingType::Fast, &config, &mut rng);
        }
        assert!(fatigue.value() > 0.0);
    }

    #[test]
    fn rest_decays_toward_zero() {
        let config = SimConfig::default();
        let mut fatigue = Fatigue(100.0);
        fatigue.rest_one_over(&config);
        assert!(fatigue.value() < 100.0);
        assert!(fatigue.value() >= 0.0);
    }
}
