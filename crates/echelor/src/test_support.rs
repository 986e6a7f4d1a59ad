//! Test support: a scripted `LlmProvider` that records every request.
//!
//! Replies are taken from a script in order; once the script is exhausted
//! every further call gets the default reply.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, ProviderInfo},
};
use async_trait::async_trait;

/// One request as the provider saw it
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub model: String,
    pub messages: Vec<(Role, String)>,
}

impl RecordedRequest {
    /// Content of the first message with `role`
    pub fn content(&self, role: Role) -> Option<&str> {
        self.messages
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, c)| c.as_str())
    }
}

pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String>>>,
    default_reply: String,
    delay: Option<Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedProvider {
    /// Always reply with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_reply: text.into(),
            delay: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Play `script` first, then fall back to `default_reply`
    pub fn scripted(script: Vec<Result<String>>, default_reply: impl Into<String>) -> Self {
        let provider = Self::replying(default_reply);
        *provider.script.lock().unwrap_or_else(|e| e.into_inner()) = script.into();
        provider
    }

    /// Sleep this long inside every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Highest number of overlapping calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "Scripted".into(),
            endpoint: "memory://scripted".into(),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                model: options.model.clone(),
                messages: messages.iter().map(|m| (m.role, m.content.clone())).collect(),
            });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(self.default_reply.clone()));

        next.map(|content| Completion {
            content,
            model: options.model.clone(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
        })
    }
}

/// Shorthand for scripting a transport failure
pub fn unavailable(msg: &str) -> Result<String> {
    Err(AgentError::ProviderUnavailable(msg.into()))
}

/// Shorthand for scripting a rate-limit response
pub fn rate_limited(msg: &str) -> Result<String> {
    Err(AgentError::RateLimited(msg.into()))
}
