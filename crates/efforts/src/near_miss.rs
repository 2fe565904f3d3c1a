//! Efforts that came close to a record without beating it.

use crate::{
    config::WindowSelection,
    effort_resolver::{HistoricalBests, resolve_workout_efforts},
    models::{NearMiss, Workout, WorkoutLap},
};

pub use crate::config::DEFAULT_NEAR_MISS_THRESHOLD;

/// Absorbs float noise so an effort at exactly the threshold ratio qualifies.
const RATIO_EPSILON: f64 = 1e-9;

/// Reports this workout's non-PR efforts whose time is within `threshold`
/// (a ratio, e.g. `1.02` for 2%) of the historical best at the same distance.
pub fn find_near_misses(
    workout: &Workout,
    laps: &[WorkoutLap],
    historical_bests: &HistoricalBests,
    threshold: f64,
) -> Vec<NearMiss> {
    find_near_misses_with(workout, laps, historical_bests, threshold, WindowSelection::Earliest)
}

pub fn find_near_misses_with(
    workout: &Workout,
    laps: &[WorkoutLap],
    historical_bests: &HistoricalBests,
    threshold: f64,
    selection: WindowSelection,
) -> Vec<NearMiss> {
    resolve_workout_efforts(workout, laps, historical_bests, selection)
        .into_iter()
        .filter(|effort| !effort.is_pr)
        .filter_map(|effort| {
            let record = historical_bests[effort.distance].as_ref()?.time_seconds;
            if record <= 0.0 {
                return None;
            }
            let ratio = effort.time_seconds / record;
            (ratio <= threshold + RATIO_EPSILON).then(|| NearMiss {
                workout_id: effort.workout_id,
                distance: effort.distance,
                time_seconds: effort.time_seconds,
                time_formatted: effort.time_formatted,
                record_seconds: record,
                missed_by_seconds: effort.time_seconds - record,
                missed_by_percent: (ratio - 1.0) * 100.0,
            })
        })
        .collect()
}
