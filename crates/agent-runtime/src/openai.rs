//! OpenAI-compatible LLM Provider
//!
//! Implementation of `LlmProvider` for the `/chat/completions` endpoint.

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::Message,
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, ProviderInfo, TokenUsage},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// OpenAI provider configuration
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Bearer credential
    pub api_key: String,

    /// API base URL, without the `/chat/completions` suffix
    pub api_base: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Read `OPENAI_API_KEY`, `OPENAI_API_BASE` and `OPENAI_TIMEOUT_SECS`.
    ///
    /// The key has no default; a missing or blank key is a configuration error.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AgentError::Config("OPENAI_API_KEY not set".into()))?;

        let api_base = std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            api_base,
            timeout_secs,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<FinishReason>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ============================================================================
// Provider
// ============================================================================

/// OpenAI-compatible chat-completion provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create from configuration
    pub fn from_config(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(OpenAiConfig::from_env()?)
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn build_request<'a>(
        messages: &'a [Message],
        options: &'a GenerationOptions,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: &options.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        }
    }

    /// Map a non-success HTTP status to the provider error taxonomy
    fn status_error(status: StatusCode, body: &str) -> AgentError {
        let detail = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        let detail = format!("{} {}", status.as_u16(), detail).trim_end().to_string();

        match status {
            StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(detail),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(detail),
            StatusCode::REQUEST_TIMEOUT => AgentError::ProviderUnavailable(detail),
            s if s.is_client_error() => AgentError::InvalidRequest(detail),
            _ => AgentError::ProviderUnavailable(detail),
        }
    }

    /// Decode a successful response body into a completion
    fn parse_completion(body: &str, requested_model: &str) -> Result<Completion> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| AgentError::Provider(format!("malformed response: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Provider("response contained no choices".into()))?;

        // A filtered or tool-only choice carries `"content": null`
        let content = choice.message.content.ok_or_else(|| {
            AgentError::Provider(format!("empty reply (finish_reason: {:?})", choice.finish_reason))
        })?;

        Ok(Completion {
            content,
            model: response.model.unwrap_or_else(|| requested_model.to_string()),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    fn transport_error(err: reqwest::Error) -> AgentError {
        if err.is_timeout() {
            AgentError::ProviderUnavailable("request timed out".into())
        } else {
            AgentError::ProviderUnavailable(err.to_string())
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "OpenAI".into(),
            endpoint: self.config.api_base.clone(),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        let result = self
            .client
            .get(self.config.url("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await;

        match result {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("OpenAI health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = Self::build_request(messages, options);

        let response = self
            .client
            .post(self.config.url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::transport_error)?;

        if !status.is_success() {
            let err = Self::status_error(status, &body);
            tracing::warn!(status = status.as_u16(), "Chat completion rejected: {}", err);
            return Err(err);
        }

        Self::parse_completion(&body, &options.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenAiConfig::new("sk-test");
        assert_eq!(config.api_base, "https://api.openai.com/v1");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.url("chat/completions"), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = OpenAiConfig::new("sk-secret");
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let config = OpenAiConfig::new("k").with_api_base("http://localhost:1234/v1/");
        assert_eq!(config.url("models"), "http://localhost:1234/v1/models");
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![
            Message::system("You are Echelor."),
            Message::user("How long is my runway?"),
        ];
        let options = GenerationOptions::for_model("gpt-4");

        let request = OpenAiProvider::build_request(&messages, &options);
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "You are Echelor."},
                    {"role": "user", "content": "How long is my runway?"}
                ]
            })
        );
    }

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{
            "model": "gpt-4-0613",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "  Runway looks healthy.\n"},
                    "finish_reason": "stop"
                },
                {
                    "index": 1,
                    "message": {"role": "assistant", "content": "ignored"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 80, "completion_tokens": 5, "total_tokens": 85}
        }"#;

        let completion = OpenAiProvider::parse_completion(body, "gpt-4").unwrap();
        assert_eq!(completion.content, "  Runway looks healthy.\n");
        assert_eq!(completion.model, "gpt-4-0613");
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.usage.unwrap().total_tokens, 85);
    }

    #[test]
    fn test_parse_without_choices_fails() {
        let err = OpenAiProvider::parse_completion(r#"{"choices": []}"#, "gpt-4").unwrap_err();
        assert!(matches!(err, AgentError::Provider(_)));
    }

    #[test]
    fn test_parse_null_content_fails() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": null}, "finish_reason": "content_filter"}
            ]
        }"#;

        let err = OpenAiProvider::parse_completion(body, "gpt-4").unwrap_err();
        assert!(matches!(err, AgentError::Provider(ref m) if m.contains("ContentFilter")));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error": {"message": "You exceeded your current quota"}}"#;
        match OpenAiProvider::status_error(StatusCode::TOO_MANY_REQUESTS, body) {
            AgentError::RateLimited(msg) => assert!(msg.contains("exceeded your current quota")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            OpenAiProvider::status_error(StatusCode::UNAUTHORIZED, ""),
            AgentError::Auth(_)
        ));
        assert!(matches!(
            OpenAiProvider::status_error(StatusCode::BAD_GATEWAY, "<html>"),
            AgentError::ProviderUnavailable(_)
        ));
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let body = r#"{"error": {"message": "This model's maximum context length is 8192 tokens"}}"#;
        let err = OpenAiProvider::status_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, AgentError::InvalidRequest(ref m) if m.contains("context length")));
        assert!(!err.is_retryable());

        for status in [StatusCode::NOT_FOUND, StatusCode::UNPROCESSABLE_ENTITY] {
            assert!(!OpenAiProvider::status_error(status, "").is_retryable());
        }
        for status in [StatusCode::REQUEST_TIMEOUT, StatusCode::SERVICE_UNAVAILABLE] {
            assert!(OpenAiProvider::status_error(status, "").is_retryable());
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let config = OpenAiConfig::new("k").with_api_base("http://127.0.0.1:9/v1").with_timeout(2);
        let provider = OpenAiProvider::from_config(config).unwrap();

        let err = provider
            .complete(&[Message::user("hi")], &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ProviderUnavailable(_)));
        assert!(!provider.health_check().await.unwrap());
    }
}
