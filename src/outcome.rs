//! The structured form of a delivery outcome.
//!
//! Outcome models and serialized fixtures speak the string grammar (`"4"`, `"W"`,
//! `"2nb"`, ...); everything downstream works with [`Outcome`] so the hot path never
//! compares strings.

use crate::error::{Error, Result};
use std::fmt;

/// What kind of delivery this was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// A legal delivery faced off the bat, for `0..=6` runs (`"5"` is scored as a four).
    Runs,
    /// A legal delivery that dismissed the striker.
    Wicket,
    /// An illegal delivery called for height/width/direction. `runs` is the total
    /// penalty-inclusive tally conceded (always >= 1).
    NoBall,
    /// An illegal delivery out of the striker's reach. `runs` is the total
    /// penalty-inclusive tally conceded (always >= 1).
    Wide,
    /// Runs taken on a legal delivery without bat contact.
    Bye,
    /// Runs taken on a legal delivery off the batter's body, not the bat.
    LegBye,
}

/// A single delivery's outcome, parsed once from its string symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub runs: u8,
}

impl Outcome {
    pub fn runs(kind_digit: u8) -> Self {
        Outcome {
            kind: OutcomeKind::Runs,
            runs: kind_digit,
        }
    }

    pub fn wicket() -> Self {
        Outcome {
            kind: OutcomeKind::Wicket,
            runs: 0,
        }
    }

    /// Parse a delivery symbol per the grammar in the outcome model's documentation.
    pub fn parse(symbol: &str) -> Result<Self> {
        if symbol == "W" {
            return Ok(Outcome::wicket());
        }
        if let Ok(n) = symbol.parse::<u8>() {
            if n <= 6 {
                return Ok(Outcome::runs(n));
            }
            return Err(Error::ModelError(format!(
                "runs off the bat out of range: {}",
                symbol
            )));
        }
        let (digits, suffix) = symbol.split_at(
            symbol
                .find(|c: char| !c.is_ascii_digit())
                .ok_or_else(|| Error::ModelError(format!("malformed outcome symbol: {}", symbol)))?,
        );
        let n: u8 = digits
            .parse()
            .map_err(|_| Error::ModelError(format!("malformed outcome symbol: {}", symbol)))?;
        let kind = match suffix {
            "nb" if (1..=7).contains(&n) => OutcomeKind::NoBall,
            "w" if (1..=5).contains(&n) => OutcomeKind::Wide,
            "b" if n >= 1 => OutcomeKind::Bye,
            "lb" if n >= 1 => OutcomeKind::LegBye,
            _ => {
                return Err(Error::ModelError(format!(
                    "unknown outcome symbol: {}",
                    symbol
                )))
            }
        };
        Ok(Outcome { kind, runs: n })
    }

    /// Whether this delivery counts toward the 6 required to complete an over.
    pub fn is_legal(&self) -> bool {
        !matches!(self.kind, OutcomeKind::NoBall | OutcomeKind::Wide)
    }

    /// Runs added to the batting team's total.
    pub fn team_runs(&self) -> u16 {
        self.runs as u16
    }

    /// Runs credited to the striker's personal tally. Byes and leg-byes credit no
    /// runs to the batter even though the team total increases.
    pub fn batter_runs(&self) -> u16 {
        match self.kind {
            OutcomeKind::Runs => self.runs as u16,
            OutcomeKind::NoBall => (self.runs.saturating_sub(1)) as u16,
            _ => 0,
        }
    }

    /// Runs conceded against the bowler's figures.
    pub fn bowler_runs(&self) -> u16 {
        match self.kind {
            OutcomeKind::Runs | OutcomeKind::NoBall | OutcomeKind::Wide => self.runs as u16,
            OutcomeKind::Wicket | OutcomeKind::Bye | OutcomeKind::LegBye => 0,
        }
    }

    /// Whether this delivery, on its own, should be scored as a four in the
    /// batter's boundary count (covers the "5" overthrow convention).
    pub fn is_four(&self) -> bool {
        self.kind == OutcomeKind::Runs && self.runs == 4
            || self.kind == OutcomeKind::Runs && self.runs == 5
            || (self.kind == OutcomeKind::NoBall && self.runs.saturating_sub(1) == 4)
    }

    pub fn is_six(&self) -> bool {
        (self.kind == OutcomeKind::Runs && self.runs == 6)
            || (self.kind == OutcomeKind::NoBall && self.runs.saturating_sub(1) == 6)
    }

    /// Whether the batters should rotate ends. Off-the-bat and no-ball outcomes
    /// rotate on odd runs faced; byes/leg-byes rotate on odd runs taken.
    pub fn rotates_strike(&self) -> bool {
        match self.kind {
            OutcomeKind::Runs => self.runs % 2 == 1,
            OutcomeKind::NoBall => self.runs.saturating_sub(1) % 2 == 1,
            OutcomeKind::Bye | OutcomeKind::LegBye => self.runs % 2 == 1,
            OutcomeKind::Wide | OutcomeKind::Wicket => false,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OutcomeKind::Runs => write!(f, "{}", self.runs),
            OutcomeKind::Wicket => write!(f, "W"),
            OutcomeKind::NoBall => write!(f, "{}nb", self.runs),
            OutcomeKind::Wide => write!(f, "{}w", self.runs),
            OutcomeKind::Bye => write!(f, "{}b", self.runs),
            OutcomeKind::LegBye => write!(f, "{}lb", self.runs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legal_runs() {
        let o = Outcome::parse("4").unwrap();
        assert_eq!(o.kind, OutcomeKind::Runs);
        assert_eq!(o.runs, 4);
        assert!(o.is_legal());
        assert!(o.is_four());
    }

    #[test]
    fn parses_wicket() {
        let o = Outcome::parse("W").unwrap();
        assert_eq!(o.kind, OutcomeKind::Wicket);
        assert!(o.is_legal());
    }

    #[test]
    fn no_ball_for_four_credits_three_to_batter() {
        let o = Outcome::parse("4nb").unwrap();
        assert!(!o.is_legal());
        assert_eq!(o.team_runs(), 4);
        assert_eq!(o.batter_runs(), 3);
        assert_eq!(o.bowler_runs(), 4);
        assert!(!o.is_four());
    }

    #[test]
    fn five_counts_as_a_four() {
        let o = Outcome::parse("5").unwrap();
        assert!(o.is_four());
        assert!(!o.is_six());
    }

    #[test]
    fn byes_credit_no_batter_runs() {
        let o = Outcome::parse("2lb").unwrap();
        assert!(o.is_legal());
        assert_eq!(o.team_runs(), 2);
        assert_eq!(o.batter_runs(), 0);
        assert_eq!(o.bowler_runs(), 0);
    }

    #[test]
    fn unknown_symbol_is_model_error() {
        assert!(matches!(Outcome::parse("7"), Err(Error::ModelError(_))));
        assert!(matches!(Outcome::parse("Wnb"), Err(_)));
    }
}
