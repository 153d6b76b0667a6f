//! Error types for persistence

use thiserror::Error;

/// Failures reading or writing persisted data (high score, settings)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid high score {value:?}: {source}")]
    Parse {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
