//! Chronological best-effort leaderboard.
//!
//! [`Leaderboard`] is a by-value reducer: each workout is applied in date order and
//! a new board comes back. PRs are judged against a snapshot of the records taken
//! when the processed date changes, so a workout is only ever compared with
//! workouts dated strictly before it.
//!
//! [`SortedHistory`] is the only input the full-history analysis accepts; it sorts
//! on construction so callers cannot feed the fold out of order by accident.

use enum_map::EnumMap;
use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::{
    config::{AnalysisConfig, WindowSelection},
    distances::StandardDistance,
    effort_resolver::{HistoricalBests, resolve_workout_efforts},
    models::{BestEffort, DistanceLeaderboard, EffortAnalysis, WorkoutWithLaps},
    pace::format_margin,
};

/// Workouts ordered by ascending date. Same-date workouts keep their input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedHistory(Vec<WorkoutWithLaps>);

impl SortedHistory {
    pub fn new(mut workouts: Vec<WorkoutWithLaps>) -> Self {
        workouts.sort_by_key(|w| w.workout.date);
        Self(workouts)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkoutWithLaps> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest_date(&self) -> Option<Date> {
        self.0.last().map(|w| w.workout.date)
    }

    /// Workouts dated strictly before `date`, and those on or after it.
    pub fn split_at_date(&self, date: Date) -> (&[WorkoutWithLaps], &[WorkoutWithLaps]) {
        let at = self.0.partition_point(|w| w.workout.date < date);
        self.0.split_at(at)
    }

    pub fn into_inner(self) -> Vec<WorkoutWithLaps> {
        self.0
    }
}

impl From<Vec<WorkoutWithLaps>> for SortedHistory {
    fn from(workouts: Vec<WorkoutWithLaps>) -> Self {
        Self::new(workouts)
    }
}

impl<'a> IntoIterator for &'a SortedHistory {
    type Item = &'a WorkoutWithLaps;
    type IntoIter = std::slice::Iter<'a, WorkoutWithLaps>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Per-distance top efforts plus the PR bookkeeping of a fold in progress.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    capacity: usize,
    selection: WindowSelection,
    entries: EnumMap<StandardDistance, Vec<BestEffort>>,
    snapshot: HistoricalBests,
    snapshot_date: Option<Date>,
    prs: Vec<BestEffort>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl Leaderboard {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            capacity: config.leaderboard_size.max(1),
            selection: config.window_selection,
            entries: EnumMap::default(),
            snapshot: HistoricalBests::default(),
            snapshot_date: None,
            prs: Vec::new(),
        }
    }

    /// Applies one workout and returns the updated board.
    pub fn apply(self, entry: &WorkoutWithLaps) -> Self {
        self.step(entry).0
    }

    /// Applies one workout, also returning the efforts it produced.
    pub fn step(mut self, entry: &WorkoutWithLaps) -> (Self, Vec<BestEffort>) {
        let date = entry.workout.date;
        if self.snapshot_date != Some(date) {
            self.snapshot = self.current_bests();
            self.snapshot_date = Some(date);
        }

        let efforts = resolve_workout_efforts(&entry.workout, &entry.laps, &self.snapshot, self.selection);

        for effort in &efforts {
            if effort.is_pr {
                debug!(
                    "New {} PR in workout {}: {}",
                    effort.distance, effort.workout_id, effort.time_formatted
                );
                self.prs.push(effort.clone());
            }
            self.insert(effort.clone());
        }

        (self, efforts)
    }

    /// Inserts keeping ascending time; equal times stay in processing order.
    fn insert(&mut self, effort: BestEffort) {
        let list = &mut self.entries[effort.distance];
        let at = list.partition_point(|e| e.time_seconds <= effort.time_seconds);
        list.insert(at, effort);
        list.truncate(self.capacity);
    }

    /// Fastest retained effort per distance, including everything applied so far.
    pub fn current_bests(&self) -> HistoricalBests {
        EnumMap::from_fn(|d| self.entries[d].first().cloned())
    }

    pub fn efforts(&self, distance: StandardDistance) -> &[BestEffort] {
        &self.entries[distance]
    }

    /// Every PR flagged so far, in processing order.
    pub fn prs(&self) -> &[BestEffort] {
        &self.prs
    }

    /// Finishes the fold: ranks retained efforts and selects recent PRs and
    /// notifications relative to `today`.
    pub fn into_analysis(mut self, today: Date, config: &AnalysisConfig) -> EffortAnalysis {
        for list in self.entries.values_mut() {
            for (i, effort) in list.iter_mut().enumerate() {
                effort.rank_all_time = Some(i as u32 + 1);
            }
        }

        let best_efforts: Vec<DistanceLeaderboard> = self
            .entries
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(distance, list)| DistanceLeaderboard {
                distance,
                efforts: list.clone(),
            })
            .collect();

        let recent_cutoff = window_start(today, config.recent_pr_days);
        let notify_cutoff = window_start(today, config.notification_days);

        let mut recent_prs: Vec<BestEffort> = self
            .prs
            .iter()
            .rev()
            .filter(|pr| pr.workout_date >= recent_cutoff)
            .map(|pr| {
                let mut pr = pr.clone();
                pr.rank_all_time = self.entries[pr.distance]
                    .iter()
                    .find(|e| e.workout_id == pr.workout_id)
                    .and_then(|e| e.rank_all_time);
                pr
            })
            .collect();
        // Stable, so same-date PRs stay latest-processed first.
        recent_prs.sort_by(|a, b| b.workout_date.cmp(&a.workout_date));

        let notifications = recent_prs
            .iter()
            .filter(|pr| pr.workout_date >= notify_cutoff)
            .map(pr_notification)
            .collect();

        EffortAnalysis {
            best_efforts,
            recent_prs,
            notifications,
        }
    }
}

/// First date inside a window of `days` ending on `today`. Windows reaching
/// past the calendar start at [`Date::MIN`].
fn window_start(today: Date, days: i64) -> Date {
    days.checked_mul(86_400)
        .map(Duration::seconds)
        .and_then(|span| today.checked_sub(span))
        .unwrap_or(Date::MIN)
}

fn pr_notification(pr: &BestEffort) -> String {
    match pr.improvement_seconds {
        Some(margin) => format!(
            "New {} PR: {} ({} faster)",
            pr.distance,
            pr.time_formatted,
            format_margin(margin)
        ),
        None => format!("New {} PR: {}", pr.distance, pr.time_formatted),
    }
}

/// Full-history analysis evaluated against today's date (UTC).
pub fn analyze_workouts_for_best_efforts(history: impl Into<SortedHistory>) -> EffortAnalysis {
    let today = OffsetDateTime::now_utc().date();
    analyze_workouts_as_of(&history.into(), today, &AnalysisConfig::default())
}

/// Full-history analysis with an explicit evaluation date and policy.
pub fn analyze_workouts_as_of(history: &SortedHistory, today: Date, config: &AnalysisConfig) -> EffortAnalysis {
    let board = history.iter().fold(Leaderboard::new(config), Leaderboard::apply);
    let analysis = board.into_analysis(today, config);

    info!(
        "Analyzed {} workout(s): {} distance(s) with efforts, {} recent PR(s)",
        history.len(),
        analysis.best_efforts.len(),
        analysis.recent_prs.len()
    );
    analysis
}
