//! Risk register error definitions

use thiserror::Error;

/// Result alias used across the crate
pub type RiskResult<T> = Result<T, RiskError>;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Rating out of range: {value} (expected 1-5)")]
    RatingOutOfRange { value: u8 },

    #[error("Risk score mismatch for {id}: {likelihood} x {impact} != {score}")]
    ScoreMismatch {
        id: String,
        likelihood: u8,
        impact: u8,
        score: u8,
    },

    #[error("Invalid assessment transition: {event} while in {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Invalid assessment submission: {0}")]
    InvalidSubmission(String),

    #[error("Config IO error: {0}")]
    ConfigIo(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Config serialization error: {0}")]
    ConfigSerialize(String),

    #[error("Invalid config: {0}")]
    ConfigInvalid(String),

    #[error("Report IO error: {0}")]
    ReportIo(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}
