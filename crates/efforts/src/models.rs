use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::distances::StandardDistance;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A recorded workout as delivered by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub distance_meters: Option<f64>,
    pub name: Option<String>,
}

impl Workout {
    pub fn new(date: Date, distance_meters: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            distance_meters,
            name: None,
        }
    }
}

/// One measured interval within a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLap {
    /// Ordering key; not necessarily 0-based or contiguous.
    pub lap_index: i64,
    pub distance_meters: Option<f64>,
    pub elapsed_time_seconds: Option<f64>,
}

impl WorkoutLap {
    pub fn new(lap_index: i64, distance_meters: f64, elapsed_time_seconds: f64) -> Self {
        Self {
            lap_index,
            distance_meters: Some(distance_meters),
            elapsed_time_seconds: Some(elapsed_time_seconds),
        }
    }
}

/// A workout together with the laps it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutWithLaps {
    pub workout: Workout,
    #[serde(default)]
    pub laps: Vec<WorkoutLap>,
}

/// The fastest window covering one standard distance within one workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestEffort {
    pub workout_id: Uuid,
    #[serde(with = "iso_date")]
    pub workout_date: Date,
    pub distance: StandardDistance,
    /// Distance actually covered by the window.
    pub distance_meters: f64,
    pub time_seconds: f64,
    pub time_formatted: String,
    pub pace_seconds_per_mile: f64,
    pub pace_formatted: String,
    pub start_lap_index: i64,
    pub end_lap_index: i64,
    /// Faster than every effort at this distance dated strictly before.
    pub is_pr: bool,
    /// 1 = fastest ever. Only set by full-history analysis.
    pub rank_all_time: Option<u32>,
    /// Previous best minus this time; positive means faster.
    pub improvement_seconds: Option<f64>,
    pub equivalent_vdot: u32,
}

/// Retained efforts for one distance, fastest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceLeaderboard {
    pub distance: StandardDistance,
    pub efforts: Vec<BestEffort>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffortAnalysis {
    pub best_efforts: Vec<DistanceLeaderboard>,
    /// Newest first.
    pub recent_prs: Vec<BestEffort>,
    pub notifications: Vec<String>,
}

impl EffortAnalysis {
    pub fn leaderboard(&self, distance: StandardDistance) -> Option<&DistanceLeaderboard> {
        self.best_efforts.iter().find(|l| l.distance == distance)
    }
}

/// An effort that came close to the record without beating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMiss {
    pub workout_id: Uuid,
    pub distance: StandardDistance,
    pub time_seconds: f64,
    pub time_formatted: String,
    pub record_seconds: f64,
    pub missed_by_seconds: f64,
    pub missed_by_percent: f64,
}

/// Everything the `efforts` binary reports for one history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffortReport {
    pub analysis: EffortAnalysis,
    pub insights: Vec<String>,
    pub near_misses: Vec<NearMiss>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_workout_json_shape() {
        let json = r#"{
            "workout": {
                "id": "6f1c2a1e-8d7b-4a43-9a0e-2f3f0d7b6c11",
                "date": "2024-03-09",
                "distance_meters": 5012.0
            },
            "laps": [
                { "lap_index": 1, "distance_meters": 1000.0, "elapsed_time_seconds": 240.5 },
                { "lap_index": 2 }
            ]
        }"#;

        let parsed: WorkoutWithLaps = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.workout.date, date!(2024 - 03 - 09));
        assert_eq!(parsed.workout.name, None);
        assert_eq!(parsed.laps.len(), 2);
        assert_eq!(parsed.laps[1].distance_meters, None);
        assert_eq!(parsed.laps[1].elapsed_time_seconds, None);

        let out = serde_json::to_value(&parsed).unwrap();
        assert_eq!(out["workout"]["date"], "2024-03-09");
    }

    #[test]
    fn test_missing_laps_default_to_empty() {
        let json = r#"{ "workout": { "id": "6f1c2a1e-8d7b-4a43-9a0e-2f3f0d7b6c11", "date": "2024-03-09" } }"#;
        let parsed: WorkoutWithLaps = serde_json::from_str(json).unwrap();
        assert!(parsed.laps.is_empty());
        assert_eq!(parsed.workout.distance_meters, None);
    }
}
