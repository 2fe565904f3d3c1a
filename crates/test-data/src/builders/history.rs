//! Fluent builder for constructing running histories.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::{Date, Duration, OffsetDateTime};

use crate::config::{HistoryConfig, LapSplitting};
use crate::generators::{WorkoutGenConfig, WorkoutGenerator};
use crate::profiles::{AthleteProfile, RunnerProfile};
use efforts::WorkoutWithLaps;

/// Builder for creating a running history.
///
/// Workouts are spread over `span_days` ending on the end date (the last workout
/// always falls on it), and the runner gets a little faster every week.
///
/// # Example
///
/// ```rust,ignore
/// let history = HistoryBuilder::new()
///     .with_workouts(20)
///     .spanning_days(60)
///     .ending_on(date!(2024 - 06 - 30))
///     .with_seed(7)
///     .build();
/// ```
pub struct HistoryBuilder {
    config: HistoryConfig,
    end_date: Option<Date>,
    profile: Box<dyn AthleteProfile>,
    workout_config: WorkoutGenConfig,
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: HistoryConfig::default(),
            end_date: None,
            profile: Box::new(RunnerProfile::default()),
            workout_config: WorkoutGenConfig::default(),
        }
    }

    /// Replaces the whole history configuration.
    pub fn with_config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_workouts(mut self, count: usize) -> Self {
        self.config.workout_count = count;
        self
    }

    pub fn spanning_days(mut self, days: i64) -> Self {
        self.config.span_days = days.max(0);
        self
    }

    /// Date of the last workout. Defaults to today (UTC).
    pub fn ending_on(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn with_profile(mut self, profile: impl AthleteProfile + 'static) -> Self {
        self.profile = Box::new(profile);
        self
    }

    pub fn with_lap_splitting(mut self, splitting: LapSplitting) -> Self {
        self.config.lap_splitting = splitting;
        self
    }

    pub fn with_run_distances(mut self, distances: Vec<f64>) -> Self {
        self.config.run_distances = distances;
        self
    }

    pub fn with_weekly_improvement(mut self, fraction: f64) -> Self {
        self.config.weekly_improvement = fraction;
        self
    }

    pub fn with_workout_config(mut self, config: WorkoutGenConfig) -> Self {
        self.workout_config = config;
        self
    }

    /// Sets the random seed for reproducible generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Generates the history, sorted by date.
    pub fn build(&self) -> Vec<WorkoutWithLaps> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let count = self.config.workout_count;
        if count == 0 || self.config.run_distances.is_empty() {
            return Vec::new();
        }

        let end = self
            .end_date
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());
        let span = self.config.span_days.max(0);
        let start = end - Duration::days(span);

        let mut offsets: Vec<i64> = (0..count).map(|_| rng.gen_range(0..=span)).collect();
        offsets.sort_unstable();
        if let Some(last) = offsets.last_mut() {
            *last = span;
        }

        let generator = WorkoutGenerator::with_config(self.workout_config.clone());

        let history: Vec<WorkoutWithLaps> = offsets
            .into_iter()
            .map(|offset| {
                let date = start + Duration::days(offset);
                let weeks = offset as f64 / 7.0;
                let fitness = 1.0 + self.config.weekly_improvement * weeks;
                let distance = self.config.run_distances
                    [rng.gen_range(0..self.config.run_distances.len())];

                generator.generate(
                    date,
                    distance,
                    self.profile.as_ref(),
                    fitness,
                    self.config.lap_splitting,
                    &mut rng,
                )
            })
            .collect();

        tracing::debug!(
            workouts = history.len(),
            %start,
            %end,
            "Generated running history"
        );

        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_history_is_sorted_and_ends_on_date() {
        let end = date!(2024 - 06 - 30);
        let history = HistoryBuilder::new()
            .with_workouts(25)
            .spanning_days(60)
            .ending_on(end)
            .with_seed(9)
            .build();

        assert_eq!(history.len(), 25);
        assert!(
            history
                .windows(2)
                .all(|w| w[0].workout.date <= w[1].workout.date)
        );
        assert_eq!(history.last().unwrap().workout.date, end);
        assert!(history[0].workout.date >= end - Duration::days(60));
    }

    #[test]
    fn test_same_seed_same_history() {
        let builder = HistoryBuilder::new()
            .with_config(HistoryConfig::quick())
            .ending_on(date!(2024 - 01 - 31));

        let lap_times = |h: Vec<WorkoutWithLaps>| -> Vec<Option<f64>> {
            h.iter()
                .flat_map(|w| w.laps.iter().map(|l| l.elapsed_time_seconds))
                .collect()
        };

        assert_eq!(lap_times(builder.build()), lap_times(builder.build()));

        let ids = |h: Vec<WorkoutWithLaps>| -> Vec<uuid::Uuid> {
            h.iter().map(|w| w.workout.id).collect()
        };
        assert_eq!(ids(builder.build()), ids(builder.build()));
        assert_eq!(builder.build(), builder.build());
    }

    #[test]
    fn test_empty_configs() {
        assert!(HistoryBuilder::new().with_workouts(0).build().is_empty());
        assert!(
            HistoryBuilder::new()
                .with_run_distances(Vec::new())
                .build()
                .is_empty()
        );
    }
}
