//! Error types for contract loading and EPV projections

use thiserror::Error;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, EpvError>;

/// Errors that can occur while loading league tables or projecting salaries
#[derive(Error, Debug)]
pub enum EpvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Missing field '{field}' in table '{table}' for player {player_id}")]
    MissingField {
        table: &'static str,
        player_id: u32,
        field: &'static str,
    },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}
