//! Where workout histories come from.
//!
//! Persistence lives outside this crate. A [`WorkoutSource`] hands over one
//! profile's complete history; analysis is then a pure, synchronous fold.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{errors::EffortError, models::WorkoutWithLaps};

#[async_trait]
pub trait WorkoutSource: Send + Sync {
    /// Every workout for the profile, with its laps, in any order.
    async fn load_history(&self) -> Result<Vec<WorkoutWithLaps>, EffortError>;
}

/// Reads a JSON array of `{ "workout": ..., "laps": [...] }` objects.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WorkoutSource for JsonFileSource {
    async fn load_history(&self) -> Result<Vec<WorkoutWithLaps>, EffortError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let history: Vec<WorkoutWithLaps> = serde_json::from_slice(&bytes)?;

        let without_laps = history.iter().filter(|w| w.laps.is_empty()).count();
        if without_laps > 0 {
            warn!(
                "{without_laps} workout(s) in {} have no laps and will not produce efforts",
                self.path.display()
            );
        }
        info!("Loaded {} workout(s) from {}", history.len(), self.path.display());

        Ok(history)
    }
}

/// A history already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    workouts: Vec<WorkoutWithLaps>,
}

impl InMemorySource {
    pub fn new(workouts: Vec<WorkoutWithLaps>) -> Self {
        Self { workouts }
    }
}

#[async_trait]
impl WorkoutSource for InMemorySource {
    async fn load_history(&self) -> Result<Vec<WorkoutWithLaps>, EffortError> {
        Ok(self.workouts.clone())
    }
}
