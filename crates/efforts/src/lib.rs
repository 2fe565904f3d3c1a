pub mod config;
pub mod distances;
pub mod effort_resolver;
pub mod errors;
pub mod insights;
pub mod leaderboard;
pub mod models;
pub mod near_miss;
pub mod pace;
pub mod source;
pub mod window_scanner;

use time::{Date, OffsetDateTime};
use tracing::info;

pub use crate::{
    config::{AnalysisConfig, DEFAULT_NEAR_MISS_THRESHOLD, WindowSelection},
    distances::StandardDistance,
    effort_resolver::{HistoricalBests, detect_best_efforts_in_workout, historical_bests_from},
    errors::EffortError,
    insights::{best_effort_insights_with, get_best_effort_insights},
    leaderboard::{Leaderboard, SortedHistory, analyze_workouts_as_of, analyze_workouts_for_best_efforts},
    models::{
        BestEffort, DistanceLeaderboard, EffortAnalysis, EffortReport, NearMiss, Workout,
        WorkoutLap, WorkoutWithLaps,
    },
    near_miss::{find_near_misses, find_near_misses_with},
    source::{InMemorySource, JsonFileSource, WorkoutSource},
};

/// Loads a history from `source` and analyzes it as of today (UTC).
pub async fn run_analysis(source: &dyn WorkoutSource, config: &AnalysisConfig) -> Result<EffortReport, EffortError> {
    let history = SortedHistory::new(source.load_history().await?);
    Ok(build_report(&history, OffsetDateTime::now_utc().date(), config))
}

/// Full analysis, insights, and near misses for the workouts on the most recent
/// date, each judged against everything dated before it.
pub fn build_report(history: &SortedHistory, today: Date, config: &AnalysisConfig) -> EffortReport {
    let analysis = analyze_workouts_as_of(history, today, config);
    let insights = best_effort_insights_with(&analysis, config);

    let near_misses = match history.latest_date() {
        Some(latest) => {
            let (before, latest_workouts) = history.split_at_date(latest);
            let bests = before
                .iter()
                .fold(Leaderboard::new(config), Leaderboard::apply)
                .current_bests();
            latest_workouts
                .iter()
                .flat_map(|w| {
                    find_near_misses_with(
                        &w.workout,
                        &w.laps,
                        &bests,
                        config.near_miss_threshold,
                        config.window_selection,
                    )
                })
                .collect()
        }
        None => Vec::new(),
    };

    info!(
        "Report ready: {} insight(s), {} near miss(es)",
        insights.len(),
        near_misses.len()
    );

    EffortReport {
        analysis,
        insights,
        near_misses,
    }
}
