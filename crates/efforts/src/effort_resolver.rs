//! Reduces scanner candidates to one best effort per distance for a workout.

use enum_map::EnumMap;
use tracing::debug;

use crate::{
    config::WindowSelection,
    distances::StandardDistance,
    models::{BestEffort, Workout, WorkoutLap},
    pace::{EffortMetrics, format_duration},
    window_scanner::{LapSplits, WindowMatch},
};

/// Current record per distance; `None` means nothing recorded yet.
pub type HistoricalBests = EnumMap<StandardDistance, Option<BestEffort>>;

/// Collects the fastest effort per distance from any set of efforts.
pub fn historical_bests_from<'a>(efforts: impl IntoIterator<Item = &'a BestEffort>) -> HistoricalBests {
    let mut bests = HistoricalBests::default();
    for effort in efforts {
        let slot = &mut bests[effort.distance];
        let faster = slot
            .as_ref()
            .is_none_or(|current| effort.time_seconds < current.time_seconds);
        if faster {
            *slot = Some(effort.clone());
        }
    }
    bests
}

impl WindowSelection {
    /// Picks one window out of candidates listed in ascending start order.
    pub fn pick(self, candidates: Vec<WindowMatch>) -> Option<WindowMatch> {
        match self {
            Self::Earliest => candidates.into_iter().next(),
            Self::Fastest => candidates
                .into_iter()
                .reduce(|best, w| if w.time_seconds < best.time_seconds { w } else { best }),
        }
    }
}

/// Finds this workout's best effort at every standard distance, judged against
/// `historical_bests`. Uses the earliest qualifying window per distance.
pub fn detect_best_efforts_in_workout(
    workout: &Workout,
    laps: &[WorkoutLap],
    historical_bests: &HistoricalBests,
) -> Vec<BestEffort> {
    resolve_workout_efforts(workout, laps, historical_bests, WindowSelection::Earliest)
}

/// As [`detect_best_efforts_in_workout`] with an explicit window policy.
///
/// Efforts come back in standard-distance order, at most one per distance.
///
/// Selection happens before pace is computed. If the selected window has zero
/// distance or time, that distance yields no effort for this workout; later
/// windows are not tried.
pub fn resolve_workout_efforts(
    workout: &Workout,
    laps: &[WorkoutLap],
    historical_bests: &HistoricalBests,
    selection: WindowSelection,
) -> Vec<BestEffort> {
    let splits = LapSplits::from_laps(laps);
    if splits.is_empty() {
        return Vec::new();
    }

    let recorded_distance = workout
        .distance_meters
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(splits.total_distance());

    StandardDistance::ALL
        .into_iter()
        .filter_map(|distance| {
            let window = selection.pick(splits.windows_for(distance, recorded_distance))?;
            build_effort(workout, &window, historical_bests[distance].as_ref())
        })
        .collect()
}

fn build_effort(workout: &Workout, window: &WindowMatch, previous: Option<&BestEffort>) -> Option<BestEffort> {
    let metrics = match EffortMetrics::compute(window.distance_meters, window.time_seconds) {
        Ok(m) => m,
        Err(e) => {
            debug!(
                "Skipping {} window in workout {} (laps {}..={}): {e}",
                window.distance, workout.id, window.start_lap_index, window.end_lap_index
            );
            return None;
        }
    };

    let is_pr = previous.is_none_or(|best| window.time_seconds < best.time_seconds);
    let improvement_seconds = previous.map(|best| best.time_seconds - window.time_seconds);

    Some(BestEffort {
        workout_id: workout.id,
        workout_date: workout.date,
        distance: window.distance,
        distance_meters: window.distance_meters,
        time_seconds: window.time_seconds,
        time_formatted: format_duration(window.time_seconds),
        pace_seconds_per_mile: metrics.pace_seconds_per_mile,
        pace_formatted: metrics.pace_formatted(),
        start_lap_index: window.start_lap_index,
        end_lap_index: window.end_lap_index,
        is_pr,
        rank_all_time: None,
        improvement_seconds,
        equivalent_vdot: metrics.equivalent_vdot,
    })
}
