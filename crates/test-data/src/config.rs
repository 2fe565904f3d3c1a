//! Configuration types for history generation.

use serde::{Deserialize, Serialize};

/// How a generated run is cut into laps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LapSplitting {
    /// Auto-lap every kilometre (the usual watch default).
    #[default]
    PerKilometer,
    /// Auto-lap every mile.
    PerMile,
    /// 400m track laps.
    Track,
    /// Fixed lap length in meters.
    Every { meters: f64 },
}

impl LapSplitting {
    pub fn lap_meters(&self) -> f64 {
        match self {
            Self::PerKilometer => 1000.0,
            Self::PerMile => efforts::pace::METERS_PER_MILE,
            Self::Track => 400.0,
            Self::Every { meters } => meters.max(1.0),
        }
    }
}

/// Configuration for a generated running history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of workouts to generate.
    pub workout_count: usize,

    /// Days between the first and last workout.
    pub span_days: i64,

    /// Run lengths, in meters, picked uniformly per workout.
    pub run_distances: Vec<f64>,

    pub lap_splitting: LapSplitting,

    /// Fractional speed gain per week of training (0.005 = 0.5% faster each week).
    pub weekly_improvement: f64,

    /// Seed for reproducible histories.
    pub seed: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            workout_count: 30,
            span_days: 90,
            run_distances: vec![5000.0, 8000.0, 10000.0, 16100.0, 21100.0],
            lap_splitting: LapSplitting::PerKilometer,
            weekly_improvement: 0.004,
            seed: 42,
        }
    }
}

impl HistoryConfig {
    /// A small, fast history for unit tests.
    pub fn quick() -> Self {
        Self {
            workout_count: 8,
            span_days: 28,
            run_distances: vec![5000.0, 10000.0],
            ..Default::default()
        }
    }
}
