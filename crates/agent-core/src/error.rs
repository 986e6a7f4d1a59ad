//! Error Types

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Provider-level error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Provider answered but the reply could not be used
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable, timed out, or failed on its side (5xx)
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider rejected the request itself (non-auth 4xx): context length,
    /// content policy, unknown model
    #[error("Request rejected: {0}")]
    InvalidRequest(String),

    /// Provider rejected the request with a rate-limit / quota response
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgentError {
    /// Transient transport failures only. Sending the same request again
    /// cannot fix a rejected, unauthorized or undecodable one, and rate
    /// limits are surfaced to the caller instead.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AgentError::ProviderUnavailable(_))
    }
}
