//! Error types for the execution seam.

use thiserror::Error;

/// Errors surfaced while handing statements to a connector.
#[derive(Debug, Error)]
pub enum Error {
    /// Failure reported by the injected connector, passed through
    /// untranslated.
    #[error("connector error: {0}")]
    Connector(String),

    /// No row found where one was required.
    #[error("row not found")]
    NotFound,

    /// A row could not be hydrated into the requested type.
    #[error("hydration error: {0}")]
    Hydration(String),
}

/// Result type alias for database operations.
pub type Result<T> = std::result::Result<T, Error>;
