//! Workout generators for test data.
//!
//! - [`WorkoutGenerator`]: Turn a run length and a profile into a workout with lap splits

pub mod workout;

pub use workout::{WorkoutGenConfig, WorkoutGenerator};
