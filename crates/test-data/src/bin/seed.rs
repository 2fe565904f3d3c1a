//! Default seed script - writes a generated running history as JSON
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin seed
//! ```
//!
//! The output path comes from `HISTORY_PATH` (default `./history.json`) and can be
//! fed straight to the `efforts` binary.

use test_data::builders::HistoryBuilder;
use test_data::config::LapSplitting;
use test_data::profiles::RunnerProfile;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::var("HISTORY_PATH").unwrap_or_else(|_| "./history.json".to_string());

    let history = HistoryBuilder::new()
        .with_workouts(60)
        .spanning_days(180)
        .with_run_distances(vec![3200.0, 5000.0, 8000.0, 10000.0, 16100.0, 21100.0, 42200.0])
        .with_profile(RunnerProfile::recreational())
        .with_lap_splitting(LapSplitting::PerKilometer)
        .with_seed(12345) // Reproducible data
        .build();

    let json = serde_json::to_string_pretty(&history)?;
    tokio::fs::write(&path, json).await?;

    let laps: usize = history.iter().map(|w| w.laps.len()).sum();

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Path: {}", path);
    tracing::info!("  Workouts: {}", history.len());
    tracing::info!("  Laps: {}", laps);

    Ok(())
}
