pub mod error;
pub mod types;

#[cfg(feature = "settlement")]
pub mod settlement;

#[cfg(feature = "display")]
pub mod display;

pub use error::SettlementError;
pub use types::*;

/// Standard result type for all settlement operations
pub type SettleResult<T> = Result<T, SettlementError>;
