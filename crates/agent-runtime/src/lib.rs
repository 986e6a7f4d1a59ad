//! # agent-runtime
//!
//! Runtime providers for the Echelor assistant.
//!
//! ## Providers
//!
//! - **OpenAI** (default): any OpenAI-compatible `/chat/completions` endpoint,
//!   including local servers such as LM Studio, llama.cpp or vLLM
//! - **Anthropic** (coming soon)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::openai::{OpenAiConfig, OpenAiProvider};
//!
//! let provider = OpenAiProvider::from_config(OpenAiConfig::from_env()?)?;
//! let gateway = AssistantGateway::new(Arc::new(provider), AssistantConfig::default());
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{AgentError, Completion, GenerationOptions, LlmProvider, Message, Result, Role};
