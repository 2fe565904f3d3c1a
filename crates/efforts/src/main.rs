use std::env;

use efforts::{AnalysisConfig, JsonFileSource, run_analysis};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let history_path = env::args()
        .nth(1)
        .or_else(|| env::var("HISTORY_PATH").ok())
        .unwrap_or_else(|| "./history.json".to_string());

    let config = AnalysisConfig::from_env()?;
    tracing::info!("Analyzing {} with {:?}", history_path, config);

    let source = JsonFileSource::new(history_path);
    let report = run_analysis(&source, &config).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
