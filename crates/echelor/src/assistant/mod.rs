//! Assistant Gateway
//!
//! Turns derived metrics into a narrative summary or an answer to a user
//! question by way of a chat-completion provider.
//!
//! Each action is one request/response. The gateway bounds concurrent
//! provider calls with a semaphore, applies a per-call timeout, and honors a
//! caller-supplied cancellation token before dispatch and while the call is
//! in flight. Prompts and replies are never stored.

pub mod prompts;

use std::sync::Arc;

use agent_core::{AgentError, GenerationOptions, LlmProvider, Message};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::config::AssistantConfig;
use crate::error::{FinanceError, Result};
use crate::model::DerivedMetrics;

use self::prompts::PromptKind;

/// A failed attempt, tagged with whether sending it again could help
struct Failure {
    error: FinanceError,
    retryable: bool,
}

impl From<AgentError> for Failure {
    fn from(err: AgentError) -> Self {
        Self {
            retryable: err.is_retryable(),
            error: err.into(),
        }
    }
}

impl From<FinanceError> for Failure {
    fn from(error: FinanceError) -> Self {
        Self {
            error,
            retryable: false,
        }
    }
}

pub struct AssistantGateway {
    provider: Arc<dyn LlmProvider>,
    config: AssistantConfig,
    permits: Arc<Semaphore>,
}

impl AssistantGateway {
    pub fn new(provider: Arc<dyn LlmProvider>, config: AssistantConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_requests.max(1)));
        Self {
            provider,
            config,
            permits,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Narrative summary of the company's financial health
    pub async fn summarize(&self, metrics: &DerivedMetrics) -> Result<String> {
        self.summarize_with_cancel(metrics, &CancellationToken::new()).await
    }

    pub async fn summarize_with_cancel(
        &self,
        metrics: &DerivedMetrics,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let messages = prompts::summary_messages(metrics);
        self.dispatch(PromptKind::Summary, &messages, cancel).await
    }

    /// Answer a free-form question about the metrics.
    ///
    /// A blank question fails with [`FinanceError::InvalidQuestion`] before
    /// anything is sent.
    pub async fn answer(&self, metrics: &DerivedMetrics, question: &str) -> Result<String> {
        self.answer_with_cancel(metrics, question, &CancellationToken::new()).await
    }

    pub async fn answer_with_cancel(
        &self,
        metrics: &DerivedMetrics,
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(FinanceError::InvalidQuestion);
        }

        let messages = prompts::question_messages(metrics, question);
        self.dispatch(PromptKind::Question, &messages, cancel).await
    }

    async fn dispatch(
        &self,
        kind: PromptKind,
        messages: &[Message],
        cancel: &CancellationToken,
    ) -> Result<String> {
        let options = self.config.generation_options();
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(FinanceError::Cancelled);
            }

            match self.attempt(kind, messages, &options, cancel).await {
                Ok(reply) => return Ok(reply),
                Err(Failure {
                    error,
                    retryable: true,
                }) if attempt < self.config.max_retries => {
                    let delay = self
                        .config
                        .retry_backoff
                        .saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    tracing::warn!(
                        kind = kind.as_str(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Assistant call failed, retrying: {}",
                        error
                    );

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(FinanceError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Err(Failure { error, .. }) => {
                    tracing::warn!(kind = kind.as_str(), "Assistant call failed: {}", error);
                    return Err(error);
                }
            }
        }
    }

    async fn attempt(
        &self,
        kind: PromptKind,
        messages: &[Message],
        options: &GenerationOptions,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, Failure> {
        let _permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FinanceError::Cancelled.into()),
            permit = self.permits.acquire() => permit.map_err(|_| {
                FinanceError::AssistantUnavailable("assistant gateway closed".into())
            })?,
        };

        tracing::debug!(
            kind = kind.as_str(),
            model = %options.model,
            prompt_chars = messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "Dispatching assistant request"
        );

        let call = tokio::time::timeout(
            self.config.request_timeout,
            self.provider.complete(messages, options),
        );

        let completion = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FinanceError::Cancelled.into()),
            result = call => match result {
                Ok(completion) => completion?,
                // Timeouts count as transport failures
                Err(_) => {
                    return Err(AgentError::ProviderUnavailable(format!(
                        "no reply within {}s",
                        self.config.request_timeout.as_secs()
                    ))
                    .into())
                }
            },
        };

        Ok(completion.content.trim().to_string())
    }
}
