//! Renders a closed [`Innings`] or [`Match`] as the textual scorecard a broadcaster
//! would print. Every impl here takes `&self` only; rendering never mutates state.

use crate::innings::Innings;
use crate::match_engine::{Match, MatchResult, Side};
use prettytable::{format::consts::*, row, Table};
use std::fmt;

fn find_player_name(team: &crate::team::Team, id: crate::player::PlayerId) -> &str {
    team.players
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.as_str())
        .unwrap_or("?")
}

impl fmt::Display for Innings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} innings", self.batting_team.name)?;

        let mut table = Table::new();
        table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row!["Batter", "Dismissal", "R (B)", "4s", "6s", "SR"]);
        for card in self.batter_cards() {
            if !card.active {
                continue;
            }
            let mut label = find_player_name(self.batting_team, card.player).to_string();
            if let Some(idx) = self
                .batting_team
                .players
                .iter()
                .position(|p| p.id == card.player)
            {
                if idx == self.batting_team.captain {
                    label.push_str(" (c)");
                }
                if idx == self.batting_team.wicketkeeper {
                    label.push_str(" (wk)");
                }
            }
            let dismissal = match &card.dismissal {
                Some(d) => d.to_string(),
                None => "not out".to_string(),
            };
            let sr = match card.strike_rate() {
                Some(sr) => format!("{:.2}", sr),
                None => "-".to_string(),
            };
            table.add_row(row![
                label,
                dismissal,
                format!("{} ({})", card.runs, card.balls),
                card.fours,
                card.sixes,
                sr,
            ]);
        }
        write!(f, "{}", table)?;

        writeln!(
            f,
            "Extras (b {}, lb {}, nb {}, w {}): {}",
            self.extras.byes,
            self.extras.legbyes,
            self.extras.noballs,
            self.extras.wides,
            self.extras.total(),
        )?;

        let total_overs =
            self.overs as f64 + self.balls_in_current_over as f64 / self.balls_per_over() as f64;
        let run_rate = if total_overs > 0.0 {
            self.team_score as f64 / total_overs
        } else {
            0.0
        };
        let declared_suffix = if self.declared { "d" } else { "" };
        writeln!(
            f,
            "Total ({} Ov, RR {:.2}): {}-{}{}",
            overs_display(self.overs, self.balls_in_current_over),
            run_rate,
            self.team_score,
            self.wkts,
            declared_suffix,
        )?;

        let did_not_bat: Vec<&str> = self
            .batter_cards()
            .iter()
            .filter(|c| !c.active)
            .map(|c| find_player_name(self.batting_team, c.player))
            .collect();
        if !did_not_bat.is_empty() {
            writeln!(f, "Did not bat: {}", did_not_bat.join(", "))?;
        }

        if !self.fow.is_empty() {
            let entries: Vec<String> = self
                .fow
                .iter()
                .map(|w| {
                    format!(
                        "{}-{} ({}, {}.{} ov)",
                        w.wicket_number,
                        w.team_score,
                        find_player_name(self.batting_team, w.batter),
                        w.overs_completed,
                        w.balls_in_over,
                    )
                })
                .collect();
            writeln!(f, "Fall of Wickets: {}", entries.join(", "))?;
        }

        let mut bowling = Table::new();
        bowling.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
        bowling.set_titles(row!["Bowler", "O", "M", "R", "W", "Econ"]);
        for card in self.bowler_cards() {
            if card.legal_balls == 0 && card.balls_in_current_over == 0 {
                continue;
            }
            bowling.add_row(row![
                find_player_name(self.bowling_team, card.player),
                card.overs_str(self.balls_per_over()),
                card.maidens,
                card.runs_conceded,
                card.wickets,
                format!("{:.2}", card.economy(self.balls_per_over())),
            ]);
        }
        write!(f, "{}", bowling)
    }
}

fn overs_display(overs: u16, balls_in_current_over: u8) -> String {
    if balls_in_current_over == 0 {
        format!("{}", overs)
    } else {
        format!("{}.{}", overs, balls_in_current_over)
    }
}

impl Match<'_> {
    fn team_name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.team_a.name,
            Side::B => &self.team_b.name,
        }
    }

    fn result_line(&self) -> String {
        match self.result {
            Some(MatchResult::WinByInnings { winner, margin }) => format!(
                "{} won by an innings and {} runs",
                self.team_name(winner),
                margin
            ),
            Some(MatchResult::WinByRuns { winner, margin }) => {
                format!("{} won by {} runs", self.team_name(winner), margin)
            }
            Some(MatchResult::WinByWickets { winner, wickets }) => {
                format!("{} won by {} wickets", self.team_name(winner), wickets)
            }
            Some(MatchResult::Tie) => "Match tied".to_string(),
            Some(MatchResult::Draw) => "Match drawn".to_string(),
            None => "Match in progress".to_string(),
        }
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} v {} at {}", self.team_a.name, self.team_b.name, self.venue.name)?;
        for innings in &self.innings {
            writeln!(f)?;
            write!(f, "{}", innings)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.result_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{PitchFactors, Venue};
    use crate::config::SimConfig;
    use crate::outcome_model::{DeliverySnapshot, OutcomeModel};
    use crate::player::{BowlingType, CareerStats, Hand, Player};
    use crate::team::Team;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct DotModel;
    impl OutcomeModel for DotModel {
        fn outcome_weights(&self, _s: &DeliverySnapshot<'_>) -> Vec<(String, f64)> {
            vec![("1".to_string(), 1.0)]
        }
    }

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
    fn a_closed_innings_renders_without_panicking() {
        let team_a = Team::new("A", eleven("A"), 0, 1, (2, 3)).unwrap();
        let team_b = Team::new("B", eleven("B"), 0, 1, (2, 3)).unwrap();
        let mut config = SimConfig::default();
        config.max_balls_per_innings = Some(12);
        let pitch = PitchFactors::default();
        let model = DotModel;
        let mut rng = StdRng::seed_from_u64(42);

        let mut innings =
            Innings::new(&team_a, &team_b, &config, pitch, &model, 1, 0, &mut rng).unwrap();
        innings.simulate(&mut rng).unwrap();
        let rendered = format!("{}", innings);
        assert!(rendered.contains("A innings"));
        assert!(rendered.contains("Extras"));
        assert!(rendered.contains("Total"));

        assert_eq!(rendered, format!("{}", innings));

        let venue = Venue::new("Test Ground", pitch);
        let mut m = Match::new(&team_a, &team_b, venue, &config, &model, &mut rng);
        m.result = Some(MatchResult::Draw);
        m.innings.push(innings);
        let match_rendered = format!("{}", m);
        assert!(match_rendered.contains("Match drawn"));
        assert_eq!(match_rendered, format!("{}", m));
    }
}
