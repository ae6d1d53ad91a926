//! Chooses the fielder/wicketkeeper involved in a dismissal.

use crate::card::DismissalMode;
use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::player::PlayerId;
use crate::sampler::{sample_uniform, sample_weighted};
use rand::Rng;
use tracing::warn;

/// Holds the fielding side's eleven players and which of them keeps wicket.
pub struct FieldingManager {
    players: Vec<PlayerId>,
    wicketkeeper_index: usize,
}

impl FieldingManager {
    pub fn new(players: Vec<PlayerId>, wicketkeeper_index: usize) -> Self {
        Self {
            players,
            wicketkeeper_index,
        }
    }

    /// Choose the fielder credited with a dismissal, or `None` when the mode has no
    /// fielder (bowled, lbw, caught-and-bowled).
    pub fn select_catcher(
        &self,
        bowler: PlayerId,
        mode: DismissalMode,
        config: &SimConfig,
        rng: &mut impl Rng,
    ) -> Result<Option<PlayerId>> {
        match mode {
            DismissalMode::Bowled | DismissalMode::Lbw | DismissalMode::CaughtAndBowled => {
                Ok(None)
            }
            DismissalMode::Stumped => Ok(Some(self.players[self.wicketkeeper_index])),
            DismissalMode::Caught => {
                let candidates: Vec<PlayerId> = self
                    .players
                    .iter()
                    .copied()
                    .filter(|&p| p != bowler)
                    .collect();
                self.weighted_fielder(&candidates, config, rng).map(Some)
            }
            DismissalMode::RunOut => {
                self.weighted_fielder(&self.players.clone(), config, rng).map(Some)
            }
        }
    }

    fn weighted_fielder(
        &self,
        candidates: &[PlayerId],
        config: &SimConfig,
        rng: &mut impl Rng,
    ) -> Result<PlayerId> {
        let wk = self.players[self.wicketkeeper_index];
        let others = candidates.len().saturating_sub(1).max(1) as f64;
        let weights: Vec<(PlayerId, f64)> = candidates
            .iter()
            .map(|&p| {
                if p == wk {
                    (p, config.wicketkeeper_fielding_weight)
                } else {
                    (p, (1.0 - config.wicketkeeper_fielding_weight) / others)
                }
            })
            .collect();
        match sample_weighted(rng, &weights) {
            Ok(id) => Ok(*id),
            Err(Error::EmptyDistribution) => {
                warn!("fielder weights degenerate, falling back to uniform choice");
                sample_uniform(rng, candidates).copied()
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bowled_has_no_fielder() {
        let mgr = FieldingManager::new((0..11).collect(), 0);
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let result = mgr
            .select_catcher(3, DismissalMode::Bowled, &config, &mut rng)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn stumped_is_always_the_keeper() {
        let mgr = FieldingManager::new((0..11).collect(), 4);
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let result = mgr
            .select_catcher(3, DismissalMode::Stumped, &config, &mut rng)
            .unwrap();
        assert_eq!(result, Some(4));
    }

    #[test]
    fn degenerate_weights_fall_back_to_uniform() {
        // Bowler is also the keeper: excluding the bowler from "caught" candidates
        // also excludes the only nonzero-weighted fielder, so every remaining
        // candidate gets weight 0 and the weighted draw must fall back to uniform.
        let mgr = FieldingManager::new((0..11).collect(), 3);
        let mut config = SimConfig::default();
        config.wicketkeeper_fielding_weight = 1.0;
        let mut rng = StdRng::seed_from_u64(2);
        let result = mgr
            .select_catcher(3, DismissalMode::Caught, &config, &mut rng)
            .unwrap();
        assert!(result.is_some());
        assert_ne!(result, Some(3));
    }

    #[test]
    fn caught_excludes_the_bowler() {
        let mgr = FieldingManager::new((0..11).collect(), 4);
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let result = mgr
                .select_catcher(3, DismissalMode::Caught, &config, &mut rng)
                .unwrap();
            assert_ne!(result, Some(3));
        }
    }
}
