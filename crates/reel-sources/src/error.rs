use thiserror::Error;

/// Why an adapter could not produce a canonical record or page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The upstream explicitly reported no match, or returned a record that
    /// cannot be identified.
    #[error("{0}")]
    NotFound(String),

    /// The upstream answered with an error payload or a body that is not
    /// the expected shape.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// No credential is configured for the upstream.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The upstream could not be reached at the transport level.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The caller supplied an id this adapter does not understand.
    #[error("invalid id: {0}")]
    InvalidId(String),
}
