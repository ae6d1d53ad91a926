//! Tunable constants for the simulation.
//!
//! Kept as a single struct rather than scattered module-level constants so a host can
//! load, tweak, and persist a configuration without touching the engine.

use serde::{Deserialize, Serialize};

/// Simulation-wide constants. `Default` gives sensible baseline values; callers
/// are free to override individual fields.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimConfig {
    /// Balls per over. Test cricket has always used six.
    pub balls_per_over: u8,
    /// Number of innings per side before the match must be decided (Test cricket: 2).
    pub innings_per_side: u8,
    /// Weight given to the wicketkeeper when a catch or run-out fielder is sampled.
    pub wicketkeeper_fielding_weight: f64,
    /// Mean fatigue increment per ball for a pace bowler.
    pub pace_fatigue_mean: f64,
    /// Variance of the fatigue increment per ball for a pace bowler.
    pub pace_fatigue_variance: f64,
    /// Mean fatigue increment per ball for a spin bowler.
    pub spin_fatigue_mean: f64,
    /// Variance of the fatigue increment per ball for a spin bowler.
    pub spin_fatigue_variance: f64,
    /// Fatigue subtracted immediately after a bowler takes a wicket.
    pub wicket_fatigue_relief: f64,
    /// Fatigue decayed per over of rest at the other end.
    pub rest_decay_per_over: f64,
    /// Midpoint of the logistic take-off-probability curve, in fatigue units.
    pub takeoff_midpoint: f64,
    /// Steepness of the logistic take-off-probability curve.
    pub takeoff_steepness: f64,
    /// Completed-overs count(s) at which the new ball becomes available.
    pub new_ball_overs: (u16, u16),
    /// Minimum deficit (runs) for a follow-on to be considered after the 2nd innings.
    pub follow_on_deficit: i32,
    /// Probability that a side enforces the follow-on when eligible.
    pub follow_on_probability: f64,
    /// Lead (runs) above which the batting side may consider declaring.
    pub declare_lead_threshold: i32,
    /// Wickets down before a declaration is considered.
    pub declare_min_wickets: u8,
    /// Optional hard cap on legal deliveries in an innings, modelling a match running
    /// out of time. `None` disables the cap (the innings only ends by all-out,
    /// target reached, or declaration).
    pub max_balls_per_innings: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            balls_per_over: 6,
            innings_per_side: 2,
            wicketkeeper_fielding_weight: 0.5,
            pace_fatigue_mean: 0.1,
            pace_fatigue_variance: 0.02,
            spin_fatigue_mean: 0.04,
            spin_fatigue_variance: 0.01,
            wicket_fatigue_relief: 0.0,
            rest_decay_per_over: 8.0,
            takeoff_midpoint: 180.0,
            takeoff_steepness: 0.2,
            new_ball_overs: (80, 81),
            follow_on_deficit: 200,
            follow_on_probability: 0.7,
            declare_lead_threshold: 350,
            declare_min_wickets: 5,
            max_balls_per_innings: None,
        }
    }
}
