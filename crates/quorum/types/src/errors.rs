//! Error types for governance operations.

/// Errors that can occur while reading or mutating governance state.
///
/// `Platform` covers transient hosting-platform failures (network, 5xx,
/// rate limits); it is propagated untouched so the caller's retry layer
/// can handle redelivery. `NotFound` is the expected-absence case (404 on
/// a label remove, a comment that is already gone); call sites that
/// anticipate absence swallow it deliberately.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceError {
    #[error("platform request failed: {0}")]
    Platform(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("metadata encoding failed: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("summarizer failed: {0}")]
    Summarizer(String),
}

impl GovernanceError {
    /// True for the expected-absence case that some call sites recover
    /// from locally rather than propagating.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GovernanceError::NotFound(_))
    }
}

/// Result type alias for governance operations.
pub type GovernanceResult<T> = Result<T, GovernanceError>;
