//! Contiguous lap-window search for standard distances.
//!
//! Laps are normalized into [`LapSplits`] once per workout, then scanned once per
//! standard distance. For every start lap the window grows one lap at a time until
//! its cumulative distance either lands within tolerance (a candidate) or runs past
//! the upper bound (abandoned).

use tracing::debug;

use crate::{distances::StandardDistance, models::WorkoutLap};

/// Share of a distance the workout must have covered before it is scanned.
const MIN_COVERAGE: f64 = 0.9;

/// A lap with its values sanitized for summation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    pub lap_index: i64,
    pub distance_meters: f64,
    pub elapsed_time_seconds: f64,
}

impl Split {
    fn from_lap(lap: &WorkoutLap) -> Self {
        Self {
            lap_index: lap.lap_index,
            distance_meters: sanitize(lap.distance_meters),
            elapsed_time_seconds: sanitize(lap.elapsed_time_seconds),
        }
    }
}

/// Missing, negative and non-finite values count as zero.
fn sanitize(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// A window of consecutive laps that matched a standard distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMatch {
    pub distance: StandardDistance,
    /// Position of the first lap in the sorted splits.
    pub start_position: usize,
    pub start_lap_index: i64,
    pub end_lap_index: i64,
    pub lap_count: usize,
    pub distance_meters: f64,
    pub time_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowState {
    Short,
    Matched,
    Overshot,
}

/// Running totals for a window growing one lap at a time.
#[derive(Debug, Clone, Default)]
struct WindowAccumulator {
    distance: f64,
    time: f64,
    laps: usize,
}

impl WindowAccumulator {
    fn next_split(&mut self, split: &Split, target: StandardDistance) -> WindowState {
        self.distance += split.distance_meters;
        self.time += split.elapsed_time_seconds;
        self.laps += 1;

        if target.matches(self.distance) {
            WindowState::Matched
        } else if target.overshot_by(self.distance) {
            WindowState::Overshot
        } else {
            WindowState::Short
        }
    }
}

/// One workout's laps, sorted by `lap_index` and sanitized.
#[derive(Debug, Clone, Default)]
pub struct LapSplits {
    splits: Vec<Split>,
    total_distance: f64,
}

impl LapSplits {
    pub fn from_laps(laps: &[WorkoutLap]) -> Self {
        let mut splits: Vec<Split> = laps.iter().map(Split::from_lap).collect();
        // Stable: duplicate indices keep their input order.
        splits.sort_by_key(|s| s.lap_index);

        let zeroed = laps
            .iter()
            .filter(|l| {
                sanitize(l.distance_meters) != l.distance_meters.unwrap_or(0.0)
                    || sanitize(l.elapsed_time_seconds) != l.elapsed_time_seconds.unwrap_or(0.0)
            })
            .count();
        if zeroed > 0 {
            debug!("Treating {zeroed} malformed lap value(s) as zero");
        }

        let total_distance = splits.iter().map(|s| s.distance_meters).sum();
        Self {
            splits,
            total_distance,
        }
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    /// Sum of all lap distances.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Candidate windows for `distance`, in ascending start order.
    ///
    /// `recorded_distance` is the workout's total; distances it covers less than
    /// 90% of are not scanned at all.
    pub fn windows_for(&self, distance: StandardDistance, recorded_distance: f64) -> Vec<WindowMatch> {
        if recorded_distance < distance.meters() * MIN_COVERAGE {
            return Vec::new();
        }

        (0..self.splits.len())
            .filter_map(|start| self.window_from(start, distance))
            .collect()
    }

    /// The first in-tolerance window beginning at `start`, if any.
    fn window_from(&self, start: usize, distance: StandardDistance) -> Option<WindowMatch> {
        let mut acc = WindowAccumulator::default();

        for split in &self.splits[start..] {
            match acc.next_split(split, distance) {
                WindowState::Short => continue,
                WindowState::Overshot => return None,
                WindowState::Matched => {
                    return Some(WindowMatch {
                        distance,
                        start_position: start,
                        start_lap_index: self.splits[start].lap_index,
                        end_lap_index: split.lap_index,
                        lap_count: acc.laps,
                        distance_meters: acc.distance,
                        time_seconds: acc.time,
                    });
                }
            }
        }

        None
    }
}
