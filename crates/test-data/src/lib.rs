//! Test data generation for best-effort analysis.
//!
//! This crate generates realistic running histories (workouts with lap splits) to
//! exercise the `efforts` engine in integration tests and to seed the `efforts`
//! binary with a JSON history.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let history = HistoryBuilder::new()
//!     .with_workouts(40)
//!     .spanning_days(120)
//!     .ending_on(date!(2024 - 06 - 30))
//!     .with_profile(RunnerProfile::recreational())
//!     .with_lap_splitting(LapSplitting::PerKilometer)
//!     .with_seed(12345)
//!     .build();
//! ```

pub mod builders;
pub mod config;
pub mod generators;
pub mod profiles;

// Re-export core types from the efforts crate
pub use efforts::{StandardDistance, Workout, WorkoutLap, WorkoutWithLaps};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::HistoryBuilder;
    pub use crate::config::{HistoryConfig, LapSplitting};
    pub use crate::generators::{WorkoutGenConfig, WorkoutGenerator};
    pub use crate::profiles::{AthleteProfile, RunnerProfile, sample_variance};
    pub use crate::{StandardDistance, Workout, WorkoutLap, WorkoutWithLaps};
}
