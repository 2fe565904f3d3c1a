//! Workout generation with realistic lap splits.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use time::Date;
use uuid::Builder;

use crate::config::LapSplitting;
use crate::profiles::{AthleteProfile, sample_variance, speed_over};
use efforts::{Workout, WorkoutLap, WorkoutWithLaps};

/// Laps shorter than this are dropped instead of recorded as a final partial lap.
const MIN_PARTIAL_LAP_METERS: f64 = 1.0;

/// Configuration for workout generation.
#[derive(Debug, Clone)]
pub struct WorkoutGenConfig {
    /// Coefficient of variation for individual lap speeds.
    pub lap_variance: f64,
    /// Probability that the workout-level distance is left unset, so consumers
    /// fall back to summing laps.
    pub missing_distance_probability: f64,
    /// Probability that the recorded workout distance differs from the lap sum
    /// (GPS drift).
    pub distance_drift_probability: f64,
}

impl Default for WorkoutGenConfig {
    fn default() -> Self {
        Self {
            lap_variance: 0.03,
            missing_distance_probability: 0.1,
            distance_drift_probability: 0.2,
        }
    }
}

impl WorkoutGenConfig {
    /// Even splits and exact distances; useful when a test needs predictable times.
    pub fn exact() -> Self {
        Self {
            lap_variance: 0.0,
            missing_distance_probability: 0.0,
            distance_drift_probability: 0.0,
        }
    }
}

/// Generates workouts with lap splits.
#[derive(Debug, Clone, Default)]
pub struct WorkoutGenerator {
    config: WorkoutGenConfig,
}

impl WorkoutGenerator {
    /// Creates a new workout generator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: WorkoutGenConfig) -> Self {
        Self { config }
    }

    /// Generates one run of `distance_meters` on `date`.
    ///
    /// `fitness` scales the profile's speed (1.0 = the profile as-is, 1.05 = 5%
    /// faster). Day-to-day variance comes from the profile and per-lap noise from
    /// the generator config. The run is cut into laps per `splitting`, with the
    /// remainder as a final partial lap. The workout id is drawn from `rng`, so a
    /// seeded rng reproduces the whole workout.
    pub fn generate(
        &self,
        date: Date,
        distance_meters: f64,
        profile: &dyn AthleteProfile,
        fitness: f64,
        splitting: LapSplitting,
        rng: &mut impl Rng,
    ) -> WorkoutWithLaps {
        let day_factor = sample_variance(profile, rng);
        let speed = speed_over(profile, distance_meters, day_factor * fitness);
        let laps = self.split_laps(distance_meters, speed, splitting.lap_meters(), rng);

        let recorded = if rng.r#gen::<f64>() < self.config.missing_distance_probability {
            None
        } else if rng.r#gen::<f64>() < self.config.distance_drift_probability {
            Some(round_to(distance_meters * rng.gen_range(0.985..1.015), 1.0))
        } else {
            Some(distance_meters)
        };

        let mut workout = Workout::new(date, recorded);
        workout.id = Builder::from_random_bytes(rng.r#gen()).into_uuid();
        workout.name = Some(workout_name(distance_meters));

        WorkoutWithLaps { workout, laps }
    }

    fn split_laps(
        &self,
        distance_meters: f64,
        speed_mps: f64,
        lap_meters: f64,
        rng: &mut impl Rng,
    ) -> Vec<WorkoutLap> {
        let noise = Normal::new(1.0, self.config.lap_variance).ok();
        let mut laps = Vec::new();
        let mut covered = 0.0;

        while distance_meters - covered >= MIN_PARTIAL_LAP_METERS {
            let length = lap_meters.min(distance_meters - covered);
            let lap_factor = match &noise {
                Some(normal) if self.config.lap_variance > 0.0 => {
                    normal.sample(rng).clamp(0.85, 1.15)
                }
                _ => 1.0,
            };
            let seconds = round_to(length / (speed_mps * lap_factor), 0.1);
            laps.push(WorkoutLap::new(laps.len() as i64, round_to(length, 0.01), seconds));
            covered += length;
        }

        laps
    }
}

fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

fn workout_name(distance_meters: f64) -> String {
    match distance_meters {
        d if d < 6000.0 => "Easy Run".to_string(),
        d if d < 12000.0 => "Tempo Run".to_string(),
        _ => "Long Run".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::RunnerProfile;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    #[test]
    fn test_laps_cover_the_distance() {
        let mut rng = StdRng::seed_from_u64(42);
        let generator = WorkoutGenerator::new();
        let run = generator.generate(
            date!(2024 - 03 - 01),
            10500.0,
            &RunnerProfile::default(),
            1.0,
            LapSplitting::PerKilometer,
            &mut rng,
        );

        assert_eq!(run.laps.len(), 11);
        let total: f64 = run.laps.iter().filter_map(|l| l.distance_meters).sum();
        assert!((total - 10500.0).abs() < 0.1);

        let last = run.laps.last().unwrap();
        assert!((last.distance_meters.unwrap() - 500.0).abs() < 0.01);
    }

    #[test]
    fn test_exact_config_gives_even_splits() {
        let mut rng = StdRng::seed_from_u64(7);
        let generator = WorkoutGenerator::with_config(WorkoutGenConfig::exact());
        let profile = RunnerProfile::with_pace(5.0).steady();
        let run = generator.generate(
            date!(2024 - 03 - 01),
            5000.0,
            &profile,
            1.0,
            LapSplitting::PerKilometer,
            &mut rng,
        );

        assert_eq!(run.workout.distance_meters, Some(5000.0));
        for lap in &run.laps {
            assert!((lap.elapsed_time_seconds.unwrap() - 300.0).abs() < 0.2);
        }
    }

    #[test]
    fn test_track_splitting_indexes_in_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let run = WorkoutGenerator::new().generate(
            date!(2024 - 03 - 01),
            1600.0,
            &RunnerProfile::elite(),
            1.0,
            LapSplitting::Track,
            &mut rng,
        );

        let indexes: Vec<i64> = run.laps.iter().map(|l| l.lap_index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_seeded_rng_reproduces_id() {
        let generate = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            WorkoutGenerator::new().generate(
                date!(2024 - 03 - 01),
                5000.0,
                &RunnerProfile::default(),
                1.0,
                LapSplitting::PerKilometer,
                &mut rng,
            )
        };

        assert_eq!(generate(11), generate(11));
        assert_ne!(generate(11).workout.id, generate(12).workout.id);
        assert_eq!(generate(11).workout.id.get_version_num(), 4);
    }

    #[test]
    fn test_fitness_makes_runs_faster() {
        let generator = WorkoutGenerator::with_config(WorkoutGenConfig::exact());
        let profile = RunnerProfile::default().steady();
        let total = |fitness: f64| {
            let mut rng = StdRng::seed_from_u64(1);
            generator
                .generate(
                    date!(2024 - 03 - 01),
                    5000.0,
                    &profile,
                    fitness,
                    LapSplitting::PerKilometer,
                    &mut rng,
                )
                .laps
                .iter()
                .filter_map(|l| l.elapsed_time_seconds)
                .sum::<f64>()
        };

        assert!(total(1.05) < total(1.0));
    }
}
