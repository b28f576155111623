//! Error taxonomy for the calendar core.
//!
//! Every fallible operation in the crate returns [`PanchangaError`]. The
//! variants map one-to-one onto the failure classes the HTTP layer cares
//! about: retryable provider outages, non-retryable upstream format drift,
//! degraded storage, and rejected input.

use thiserror::Error;

/// Failures surfaced by the ephemeris, calendar, and storage layers.
#[derive(Debug, Error)]
pub enum PanchangaError {
    /// The ephemeris provider could not be reached, timed out, or returned
    /// a non-success status. Callers may retry.
    #[error("ephemeris service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The provider answered, but the response carried no `$$SOE`/`$$EOE`
    /// data block. Indicates upstream format drift; not retryable.
    #[error("ephemeris response has no $$SOE/$$EOE data block")]
    InvalidResponse,

    /// A data block was present but no line matched the `X= Y= Z=` state
    /// vector pattern. Not retryable.
    #[error("no state-vector line found in ephemeris data block")]
    ParseError,

    /// The durable ledger was unreachable or a read/write failed. Reads
    /// degrade to recomputation; writes degrade to serving unpersisted
    /// records.
    #[error("storage failure: {0}")]
    Storage(String),

    /// The query instant did not match `YYYY-MM-DD` or
    /// `YYYY-MM-DDTHH:MM:SS`.
    #[error("invalid instant {0:?}: expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS (UTC)")]
    InvalidArgument(String),
}

impl From<rusqlite::Error> for PanchangaError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for PanchangaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<tokio::task::JoinError> for PanchangaError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Storage(format!("blocking task failed: {e}"))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PanchangaError>;
