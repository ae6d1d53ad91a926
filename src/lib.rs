//! Ball-by-ball Test cricket match simulation.
//!
//! A [`match_engine::Match`] sequences up to four [`innings::Innings`], each of
//! which drives deliveries one at a time through an [`outcome_model::OutcomeModel`],
//! the [`managers`], and the bookkeeping in [`card`] and [`partnership`].

pub mod card;
pub mod conditions;
pub mod config;
pub mod error;
pub mod fatigue;
pub mod innings;
pub mod managers;
pub mod match_engine;
pub mod outcome;
pub mod outcome_model;
pub mod over;
pub mod partnership;
pub mod player;
pub mod sampler;
pub mod scorecard;
pub mod team;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{PitchFactors, Venue};
    use crate::config::SimConfig;
    use crate::match_engine::Match;
    use crate::outcome_model::NullModel;
    use crate::player::{BowlingType, CareerStats, Hand, Player};
    use crate::team::Team;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn eleven(label: &str) -> Vec<Player> {
        (0..11)
            .map(|i| {
                Player::new(
                    format!("{}{}", label, i),
                    format!("{}{}", label, i),
                    Hand::Right,
                    Hand::Right,
                    if i % 4 == 0 {
                        BowlingType::Offbreak
                    } else {
                        BowlingType::Fast
                    },
                    CareerStats::default(),
                )
            })
            .collect()
    }

    #[test]
    fn a_full_match_reaches_a_result() {
        let team_a = Team::new("Anthers", eleven("A"), 0, 1, (2, 3)).unwrap();
        let team_b = Team::new("Bellwood", eleven("B"), 0, 1, (2, 3)).unwrap();
        let mut config = SimConfig::default();
        // Keep the integration test fast: cap every innings well short of a full day.
        config.max_balls_per_innings = Some(120);
        let venue = Venue::new("Crate Oval", PitchFactors::default());
        let model = NullModel;
        let mut rng = StdRng::seed_from_u64(2024);

        let mut m = Match::new(&team_a, &team_b, venue, &config, &model, &mut rng);
        let result = m.simulate(&mut rng).unwrap();

        assert!(m.result.is_some());
        assert_eq!(m.result.unwrap(), result);
        assert!(!m.innings.is_empty());
        for innings in &m.innings {
            let batter_runs: u16 = innings.batter_cards().iter().map(|c| c.runs).sum();
            assert_eq!(innings.team_score, batter_runs + innings.extras.total());
        }
        // Rendering must not panic on a fully-played match.
        let _ = format!("{}", m);
    }
}
