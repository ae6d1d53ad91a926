//! Orchestrates one team's innings, delivery by delivery.

use crate::card::{BatterCard, BowlerCard, Competency, Dismissal, DismissalMode};
use crate::config::SimConfig;
use crate::conditions::PitchFactors;
use crate::error::{Error, Result};
use crate::managers::{BattingManager, BowlingManager, FieldingManager};
use crate::outcome::Outcome;
use crate::outcome_model::{DeliverySnapshot, OutcomeModel};
use crate::over::{Ball, Over};
use crate::partnership::{Extras, FallOfWicket, Partnership};
use crate::player::{Player, PlayerId};
use crate::sampler::sample_weighted;
use crate::team::Team;
use rand::Rng;
use tracing::debug;

fn find_player<'b>(team: &'b Team, id: PlayerId) -> Option<&'b Player> {
    team.players.iter().find(|p| p.id == id)
}

/// Why an innings stopped accepting deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    AllOut,
    /// The chasing side reached its target (only possible in the final innings).
    Win,
    Declared,
    Draw,
}

pub struct Innings<'a> {
    pub batting_team: &'a Team,
    pub bowling_team: &'a Team,
    config: &'a SimConfig,
    pitch: PitchFactors,
    model: &'a dyn OutcomeModel,

    pub innings_number: u8,
    pub overs: u16,
    pub balls_in_current_over: u8,
    pub legal_delivs: u32,
    pub team_score: u16,
    pub lead: i32,
    pub wkts: u8,
    pub declared: bool,
    pub is_open: bool,
    pub close_reason: Option<CloseReason>,

    batter_cards: Vec<BatterCard>,
    batting_manager: BattingManager,
    bowling_manager: BowlingManager,
    fielding_manager: FieldingManager,

    striker_idx: Option<usize>,
    nonstriker_idx: Option<usize>,
    bowl1: PlayerId,
    bowl2: PlayerId,

    overs_list: Vec<Over>,
    pub partnerships: Vec<Partnership>,
    pub fow: Vec<FallOfWicket>,
    pub extras: Extras,
}

impl<'a> Innings<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        batting_team: &'a Team,
        bowling_team: &'a Team,
        config: &'a SimConfig,
        pitch: PitchFactors,
        model: &'a dyn OutcomeModel,
        innings_number: u8,
        starting_lead: i32,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let batter_order: Vec<PlayerId> = batting_team.batting_order().map(|p| p.id).collect();
        let batter_cards: Vec<BatterCard> = batter_order.iter().map(|&id| BatterCard::new(id)).collect();
        let batting_manager = BattingManager::new(batter_order);

        let bowler_cards: Vec<BowlerCard> = bowling_team
            .players
            .iter()
            .map(|p| {
                let competency =
                    Competency::from_career(p.career.balls_bowled, p.career.innings_batted);
                BowlerCard::new(p.id, p.bowling_type, competency)
            })
            .collect();
        let bowling_manager = BowlingManager::new(bowler_cards);

        let fielding_manager = FieldingManager::new(
            bowling_team.players.iter().map(|p| p.id).collect(),
            bowling_team.wicketkeeper,
        );

        let bowl1 = bowling_team.players[bowling_team.opening_bowlers.0].id;
        let bowl2 = bowling_team.players[bowling_team.opening_bowlers.1].id;

        let mut innings = Self {
            batting_team,
            bowling_team,
            config,
            pitch,
            model,
            innings_number,
            overs: 0,
            balls_in_current_over: 0,
            legal_delivs: 0,
            team_score: 0,
            lead: starting_lead,
            wkts: 0,
            declared: false,
            is_open: true,
            close_reason: None,
            batter_cards,
            batting_manager,
            bowling_manager,
            fielding_manager,
            striker_idx: None,
            nonstriker_idx: None,
            bowl1,
            bowl2,
            overs_list: vec![Over::new(0)],
            partnerships: Vec::new(),
            fow: Vec::new(),
            extras: Extras::default(),
        };

        let opener_a = innings.batting_manager.next_in()?;
        let opener_b = innings.batting_manager.next_in()?;
        let idx_a = innings.card_index(opener_a)?;
        let idx_b = innings.card_index(opener_b)?;
        innings.batter_cards[idx_a].activate()?;
        innings.batter_cards[idx_b].activate()?;
        let (striker_idx, nonstriker_idx) = if rng.gen_bool(0.5) {
            (idx_a, idx_b)
        } else {
            (idx_b, idx_a)
        };
        innings.striker_idx = Some(striker_idx);
        innings.nonstriker_idx = Some(nonstriker_idx);
        innings
            .partnerships
            .push(Partnership::new(opener_a, opener_b));

        innings.bowling_manager.card_mut(bowl1).unwrap().start_new_spell();

        Ok(innings)
    }

    fn card_index(&self, player: PlayerId) -> Result<usize> {
        self.batter_cards
            .iter()
            .position(|c| c.player == player)
            .ok_or(Error::PlayerNotFound(player))
    }

    fn striker_idx(&self) -> Result<usize> {
        self.striker_idx
            .ok_or_else(|| Error::StateViolation("no striker at the crease".into()))
    }

    fn nonstriker_idx(&self) -> Result<usize> {
        self.nonstriker_idx
            .ok_or_else(|| Error::StateViolation("no non-striker at the crease".into()))
    }

    pub fn striker(&self) -> Result<&BatterCard> {
        Ok(&self.batter_cards[self.striker_idx()?])
    }

    pub fn batter_cards(&self) -> &[BatterCard] {
        &self.batter_cards
    }

    pub fn bowler_cards(&self) -> &[BowlerCard] {
        self.bowling_manager.cards()
    }

    pub fn overs_bowled(&self) -> &[Over] {
        &self.overs_list
    }

    pub fn balls_per_over(&self) -> u8 {
        self.config.balls_per_over
    }

    /// Run deliveries until the innings closes, returning why it stopped.
    pub fn simulate(&mut self, rng: &mut impl Rng) -> Result<CloseReason> {
        while self.is_open {
            if let Err(e) = self.play_delivery(rng) {
                tracing::error!(
                    innings_number = self.innings_number,
                    overs = self.overs,
                    ball = self.balls_in_current_over,
                    error = %e,
                    "fatal error mid-delivery"
                );
                return Err(e);
            }
        }
        self.close_reason
            .ok_or_else(|| Error::StateViolation("innings closed without a reason".into()))
    }

    fn play_delivery(&mut self, rng: &mut impl Rng) -> Result<()> {
        let striker_idx = self.striker_idx()?;
        let striker_player_id = self.batter_cards[striker_idx].player;
        let striker_player = find_player(self.batting_team, striker_player_id)
            .ok_or(Error::PlayerNotFound(striker_player_id))?;
        let bowler_player = find_player(self.bowling_team, self.bowl1)
            .ok_or(Error::PlayerNotFound(self.bowl1))?;
        let bowler_card = self
            .bowling_manager
            .card(self.bowl1)
            .ok_or(Error::PlayerNotFound(self.bowl1))?;

        let snapshot = DeliverySnapshot {
            striker: striker_player,
            striker_card: &self.batter_cards[striker_idx],
            bowler: bowler_player,
            bowler_card,
            pitch: &self.pitch,
            overs_elapsed: self.overs,
        };
        let weights = self.model.outcome_weights(&snapshot);
        let symbol = sample_weighted(rng, &weights)?.clone();
        let outcome = Outcome::parse(&symbol)?;

        let ball = Ball {
            bowler: self.bowl1,
            batter: striker_player_id,
            outcome,
        };
        self.overs_list
            .last_mut()
            .expect("at least one over exists")
            .record(ball);

        self.batter_cards[striker_idx].update_score(&outcome);
        self.bowling_manager
            .card_mut(self.bowl1)
            .unwrap()
            .update_score(&outcome, self.config.balls_per_over);
        self.bowling_manager
            .card_mut(self.bowl1)
            .unwrap()
            .fatigue
            .ball_bowled(bowler_player.bowling_type, self.config, rng);
        self.extras.apply(&outcome);

        self.team_score += outcome.team_runs();
        self.lead += outcome.team_runs() as i32;

        self.credit_partnership(striker_player_id, &outcome);

        if outcome.is_legal() {
            self.legal_delivs += 1;
            self.balls_in_current_over += 1;
        }

        if outcome.kind == crate::outcome::OutcomeKind::Wicket {
            self.process_wicket(striker_idx, rng)?;
        } else if outcome.rotates_strike() {
            self.rotate_strike();
        }

        self.check_state(rng)
    }

    fn credit_partnership(&mut self, striker: PlayerId, outcome: &Outcome) {
        let ball_faced = !matches!(outcome.kind, crate::outcome::OutcomeKind::Wide);
        if let Some(p) = self.partnerships.last_mut() {
            p.credit_ball(striker, outcome.batter_runs(), ball_faced);
        }
    }

    fn rotate_strike(&mut self) {
        std::mem::swap(&mut self.striker_idx, &mut self.nonstriker_idx);
    }

    fn process_wicket(&mut self, striker_idx: usize, rng: &mut impl Rng) -> Result<()> {
        self.wkts += 1;

        let bowler_card = self.bowling_manager.card(self.bowl1).unwrap();
        let mode = sample_dismissal_mode(rng, bowler_card.bowling_type)?;
        let fielder = self
            .fielding_manager
            .select_catcher(self.bowl1, mode, self.config, rng)?;
        let bowler_ref = if mode == DismissalMode::RunOut {
            None
        } else {
            Some(self.bowl1)
        };
        let dismissal = Dismissal::new(mode, bowler_ref, fielder)?;
        self.batter_cards[striker_idx].dismiss(dismissal)?;
        if mode != DismissalMode::RunOut {
            self.bowling_manager
                .card_mut(self.bowl1)
                .unwrap()
                .record_wicket();
            self.bowling_manager
                .card_mut(self.bowl1)
                .unwrap()
                .fatigue
                .wicket_taken(self.config);
        }

        self.fow.push(FallOfWicket {
            batter: self.batter_cards[striker_idx].player,
            wicket_number: self.wkts,
            team_score: self.team_score,
            overs_completed: self.overs,
            balls_in_over: self.balls_in_current_over,
        });

        if let Some(p) = self.partnerships.last_mut() {
            p.close();
        }

        if self.wkts < 10 {
            let next = self.batting_manager.next_in()?;
            let next_idx = self.card_index(next)?;
            self.batter_cards[next_idx].activate()?;
            let surviving = self.batter_cards[self.nonstriker_idx()?].player;
            self.partnerships.push(Partnership::new(next, surviving));
            self.striker_idx = Some(next_idx);
        } else {
            self.striker_idx = None;
        }
        Ok(())
    }

    /// Index of the last innings the match can reach: two per side.
    fn final_innings_number(&self) -> u8 {
        2 * self.config.innings_per_side
    }

    fn should_declare(&self) -> bool {
        self.innings_number < self.final_innings_number()
            && self.wkts >= self.config.declare_min_wickets
            && self.lead >= self.config.declare_lead_threshold
    }

    fn check_state(&mut self, rng: &mut impl Rng) -> Result<()> {
        if self.innings_number == self.final_innings_number() && self.lead > 0 {
            self.close(CloseReason::Win);
            return Ok(());
        }
        if self.wkts == 10 {
            self.close(CloseReason::AllOut);
            return Ok(());
        }
        if self.should_declare() {
            self.declared = true;
            self.close(CloseReason::Declared);
            return Ok(());
        }
        if let Some(max) = self.config.max_balls_per_innings {
            if self.legal_delivs >= max {
                self.close(CloseReason::Draw);
                return Ok(());
            }
        }
        if self.balls_in_current_over >= self.config.balls_per_over {
            self.end_over(rng)?;
        }
        Ok(())
    }

    fn close(&mut self, reason: CloseReason) {
        debug!(
            innings_number = self.innings_number,
            score = self.team_score,
            wkts = self.wkts,
            reason = ?reason,
            "innings closing"
        );
        self.is_open = false;
        self.close_reason = Some(reason);
    }

    fn end_over(&mut self, rng: &mut impl Rng) -> Result<()> {
        self.overs += 1;
        self.balls_in_current_over = 0;
        self.rotate_strike();

        let next_bowler =
            self.bowling_manager
                .end_over(self.bowl1, self.bowl2, self.overs, self.config, rng)?;
        self.bowl2 = self.bowl1;
        self.bowl1 = next_bowler;
        self.bowling_manager
            .card_mut(self.bowl1)
            .unwrap()
            .start_new_spell();

        self.overs_list.push(Over::new(self.overs));
        Ok(())
    }
}

fn sample_dismissal_mode(
    rng: &mut impl Rng,
    bowling_type: crate::player::BowlingType,
) -> Result<DismissalMode> {
    let weights: Vec<(DismissalMode, f64)> = if bowling_type.is_slow() {
        vec![
            (DismissalMode::Bowled, 0.15),
            (DismissalMode::Lbw, 0.10),
            (DismissalMode::Caught, 0.40),
            (DismissalMode::CaughtAndBowled, 0.05),
            (DismissalMode::Stumped, 0.25),
            (DismissalMode::RunOut, 0.05),
        ]
    } else {
        vec![
            (DismissalMode::Bowled, 0.30),
            (DismissalMode::Lbw, 0.20),
            (DismissalMode::Caught, 0.40),
            (DismissalMode::CaughtAndBowled, 0.05),
            (DismissalMode::Stumped, 0.01),
            (DismissalMode::RunOut, 0.04),
        ]
    };
    sample_weighted(rng, &weights).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome_model::NullModel;
    use crate::player::{BowlingType, CareerStats, Hand, Player, PlayerDb};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn eleven(db: &mut PlayerDb, label: &str) -> Vec<PlayerId> {
        (0..11)
            .map(|i| {
                let player = Player::new(
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
                );
                db.add(player).unwrap().id
            })
            .collect()
    }

    fn make_team(db: &mut PlayerDb, label: &str) -> Team {
        let ids = eleven(db, label);
        let players = ids.iter().map(|&id| db.get(id).unwrap().clone()).collect();
        Team::new(label, players, 0, 1, (2, 3)).unwrap()
    }

    #[test]
    fn all_out_scenario_with_forced_wickets() {
        struct AllWicketModel;
        impl OutcomeModel for AllWicketModel {
            fn outcome_weights(&self, _s: &DeliverySnapshot<'_>) -> Vec<(String, f64)> {
                vec![("W".to_string(), 1.0)]
            }
        }

        let mut db = PlayerDb::new();
        let batting = make_team(&mut db, "A");
        let bowling = make_team(&mut db, "B");
        let config = SimConfig::default();
        let pitch = PitchFactors::default();
        let model = AllWicketModel;
        let mut rng = StdRng::seed_from_u64(7);

        let mut innings =
            Innings::new(&batting, &bowling, &config, pitch, &model, 1, 0, &mut rng).unwrap();
        let reason = innings.simulate(&mut rng).unwrap();

        assert_eq!(reason, CloseReason::AllOut);
        assert_eq!(innings.wkts, 10);
        assert_eq!(innings.team_score, 0);
        assert_eq!(innings.fow.len(), 10);
        for w in &innings.fow {
            assert!(w.wicket_number >= 1 && w.wicket_number <= 10);
        }
    }

    #[test]
    fn maiden_over_of_dot_balls() {
        struct DotModel;
        impl OutcomeModel for DotModel {
            fn outcome_weights(&self, _s: &DeliverySnapshot<'_>) -> Vec<(String, f64)> {
                vec![("0".to_string(), 1.0)]
            }
        }

        let mut db = PlayerDb::new();
        let batting = make_team(&mut db, "A");
        let bowling = make_team(&mut db, "B");
        let mut config = SimConfig::default();
        config.max_balls_per_innings = Some(6);
        let pitch = PitchFactors::default();
        let model = DotModel;
        let mut rng = StdRng::seed_from_u64(1);

        let mut innings =
            Innings::new(&batting, &bowling, &config, pitch, &model, 1, 0, &mut rng).unwrap();
        let reason = innings.simulate(&mut rng).unwrap();
        assert_eq!(reason, CloseReason::Draw);
        assert_eq!(innings.team_score, 0);
        assert_eq!(innings.bowler_cards()[0].maidens, 1);
    }

    #[test]
    fn team_score_equals_batter_runs_plus_extras() {
        let mut db = PlayerDb::new();
        let batting = make_team(&mut db, "A");
        let bowling = make_team(&mut db, "B");
        let config = SimConfig::default();
        let pitch = PitchFactors::default();
        let model = NullModel;
        let mut rng = StdRng::seed_from_u64(99);

        let mut innings =
            Innings::new(&batting, &bowling, &config, pitch, &model, 1, 0, &mut rng).unwrap();
        for _ in 0..30 {
            if !innings.is_open {
                break;
            }
            innings.play_delivery(&mut rng).unwrap();
            let batter_runs: u16 = innings.batter_cards().iter().map(|c| c.runs).sum();
            assert_eq!(innings.team_score, batter_runs + innings.extras.total());
        }
    }
}
