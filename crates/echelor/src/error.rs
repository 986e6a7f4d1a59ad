//! Error Types for Echelor

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinanceError>;

#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Question must not be empty")]
    InvalidQuestion,

    #[error("Assistant unavailable: {0}")]
    AssistantUnavailable(String),

    #[error("Assistant quota exceeded: {0}")]
    AssistantQuotaExceeded(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FinanceError {
    /// Short code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            FinanceError::InvalidSnapshot(_) => "INVALID_SNAPSHOT",
            FinanceError::InvalidQuestion => "INVALID_QUESTION",
            FinanceError::AssistantUnavailable(_) => "ASSISTANT_UNAVAILABLE",
            FinanceError::AssistantQuotaExceeded(_) => "ASSISTANT_QUOTA_EXCEEDED",
            FinanceError::Cancelled => "CANCELLED",
            FinanceError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Text shown inline in place of the expected output
    pub fn user_message(&self) -> String {
        match self {
            FinanceError::InvalidSnapshot(msg) => {
                format!("The financial data is incomplete: {}", msg)
            }
            FinanceError::InvalidQuestion => "Please enter a question for Echelor.".into(),
            FinanceError::AssistantUnavailable(_) => {
                "Echelor is unavailable right now. Please try again.".into()
            }
            FinanceError::AssistantQuotaExceeded(_) => {
                "Echelor has hit its usage limit. Please wait a moment and try again.".into()
            }
            FinanceError::Cancelled => "The request was cancelled.".into(),
            FinanceError::Config(_) => "Echelor is not configured correctly.".into(),
        }
    }
}

/// Rate limits surface as quota errors; everything else the provider can
/// report, transient or not, is `AssistantUnavailable`. Whether a failure may
/// be retried is decided on the [`AgentError`] before this conversion.
impl From<AgentError> for FinanceError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::RateLimited(msg) => FinanceError::AssistantQuotaExceeded(msg),
            AgentError::Config(msg) => FinanceError::Config(msg),
            other => FinanceError::AssistantUnavailable(other.to_string()),
        }
    }
}
