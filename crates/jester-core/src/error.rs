use thiserror::Error;

/// Top-level error type for Jester.
#[derive(Debug, Error)]
pub enum JesterError {
    /// The joke service reported an error or could not be reached.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The joke service did not answer within the configured ceiling.
    #[error("upstream timed out after {0}s")]
    Timeout(u64),

    /// The joke service answered with something that is not a usable joke.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// The inbound webhook request could not be interpreted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A request failed in a way no other variant describes.
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
