use thiserror::Error;

/// Errors surfaced while setting up a dashboard. Nothing on the tick path fails.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("config error: {0}")]
    Config(String),

    #[error("window capacity {requested} outside 1..={max}")]
    InvalidCapacity { requested: usize, max: usize },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
