//! A model driven only by career batting/bowling averages and strike rates.

use super::{DeliverySnapshot, OutcomeModel};

/// Combines a batter's and bowler's independent wicket probabilities for this
/// delivery, plus the pitch, into a full outcome weight map. Cruder than a fitted
/// model but grounded entirely in numbers already on the scorecard.
pub struct NaiveStatsModel;

impl OutcomeModel for NaiveStatsModel {
    fn outcome_weights(&self, snapshot: &DeliverySnapshot<'_>) -> Vec<(String, f64)> {
        let batting = &snapshot.striker.career;
        let bowling = &snapshot.bowler.career;

        // Runs per ball implied by the batter's career strike rate.
        let lambda = (batting.batting_strike_rate / 100.0).clamp(0.1, 1.5);

        // Per-ball wicket probability implied independently by each player, then
        // combined on a logistic (odds) scale so neither side dominates alone.
        let bat_wkt_prob = (1.0 / batting.batting_average.max(1.0)).clamp(0.0005, 0.2);
        let bowl_wkt_prob = (1.0 / bowling.bowling_strike_rate.max(1.0)).clamp(0.0005, 0.2);
        let mut wkt_prob = avg_probs(bat_wkt_prob, bowl_wkt_prob);

        if snapshot.bowler_card.bowling_type.is_slow() {
            wkt_prob *= 1.0 + 0.3 * snapshot.pitch.spin;
        } else {
            wkt_prob *= 1.0 + 0.3 * snapshot.pitch.seam;
        }
        let wkt_prob = wkt_prob.clamp(0.0005, 0.25);

        let legal_pool = 1.0 - wkt_prob;
        let dot = (1.0 - lambda).clamp(0.05, 0.8) * legal_pool;
        let six = (0.05 * lambda).clamp(0.0, 0.15) * legal_pool;
        let four = (0.18 * lambda).clamp(0.0, 0.35) * legal_pool;
        let three = 0.02 * legal_pool;
        let two = 0.08 * legal_pool;
        let remainder = (legal_pool - dot - six - four - three - two).max(0.0);

        vec![
            ("0".to_string(), dot),
            ("1".to_string(), remainder),
            ("2".to_string(), two),
            ("3".to_string(), three),
            ("4".to_string(), four),
            ("6".to_string(), six),
            ("W".to_string(), wkt_prob),
            ("1nb".to_string(), 0.01),
            ("1w".to_string(), 0.015),
            ("1b".to_string(), 0.008),
            ("1lb".to_string(), 0.008),
        ]
    }
}

/// Combine two independent probabilities on a logistic (odds) scale, splitting the
/// difference rather than letting either side simply dominate.
fn avg_probs(p1: f64, p2: f64) -> f64 {
    let p1 = p1.clamp(1e-6, 1.0 - 1e-6);
    let p2 = p2.clamp(1e-6, 1.0 - 1e-6);
    let avg_odds = ((p1 * p2) / ((1.0 - p1) * (1.0 - p2))).sqrt();
    avg_odds / (1.0 + avg_odds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{BatterCard, BowlerCard, Competency};
    use crate::conditions::PitchFactors;
    use crate::player::{BowlingType, CareerStats, Hand, Player};

    fn snapshot_with(career_bat: CareerStats, career_bowl: CareerStats) -> (Player, Player) {
        let striker = Player::new(
            "A",
            "A",
            Hand::Right,
            Hand::Right,
            BowlingType::Medium,
            career_bat,
        );
        let bowler = Player::new(
            "B",
            "B",
            Hand::Right,
            Hand::Right,
            BowlingType::Fast,
            career_bowl,
        );
        (striker, bowler)
    }

    #[test]
    fn weights_are_all_non_negative_and_sum_near_one() {
        let (striker, bowler) = snapshot_with(CareerStats::default(), CareerStats::default());
        let striker_card = BatterCard::new(striker.id);
        let bowler_card = BowlerCard::new(bowler.id, BowlingType::Fast, Competency::FullTime);
        let pitch = PitchFactors::default();
        let snapshot = DeliverySnapshot {
            striker: &striker,
            striker_card: &striker_card,
            bowler: &bowler,
            bowler_card: &bowler_card,
            pitch: &pitch,
            overs_elapsed: 0,
        };
        let weights = NaiveStatsModel.outcome_weights(&snapshot);
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        assert!(weights.iter().all(|(_, w)| *w >= 0.0));
        assert!((total - 1.0).abs() < 0.2);
    }

    #[test]
    fn a_weaker_batting_average_raises_wicket_probability() {
        let mut weak = CareerStats::default();
        weak.batting_average = 10.0;
        let mut strong = CareerStats::default();
        strong.batting_average = 60.0;

        let (weak_striker, bowler) = snapshot_with(weak, CareerStats::default());
        let (strong_striker, _) = snapshot_with(strong, CareerStats::default());
        let striker_card = BatterCard::new(weak_striker.id);
        let bowler_card = BowlerCard::new(bowler.id, BowlingType::Fast, Competency::FullTime);
        let pitch = PitchFactors::default();

        let weak_w = NaiveStatsModel.outcome_weights(&DeliverySnapshot {
            striker: &weak_striker,
            striker_card: &striker_card,
            bowler: &bowler,
            bowler_card: &bowler_card,
            pitch: &pitch,
            overs_elapsed: 0,
        });
        let strong_w = NaiveStatsModel.outcome_weights(&DeliverySnapshot {
            striker: &strong_striker,
            striker_card: &striker_card,
            bowler: &bowler,
            bowler_card: &bowler_card,
            pitch: &pitch,
            overs_elapsed: 0,
        });
        let wkt_weight = |w: &[(String, f64)]| w.iter().find(|(s, _)| s == "W").unwrap().1;
        assert!(wkt_weight(&weak_w) > wkt_weight(&strong_w));
    }
}
