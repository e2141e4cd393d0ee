use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid fee schedule: {field} — {reason}")]
    InvalidSchedule { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SettlementError {
    fn from(e: serde_json::Error) -> Self {
        SettlementError::SerializationError(e.to_string())
    }
}
