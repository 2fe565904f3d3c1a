use thiserror::Error;

#[derive(Error, Debug)]
pub enum EffortError {
    #[error("Degenerate window: {distance_meters:.1}m in {time_seconds:.1}s has no finite pace")]
    DegenerateWindow {
        distance_meters: f64,
        time_seconds: f64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
