use thiserror::Error;

/// Errors raised while loading configuration or catalog files
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
