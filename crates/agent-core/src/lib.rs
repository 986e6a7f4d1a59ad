//! # agent-core
//!
//! Provider-agnostic LLM abstraction used by the Echelor assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐     ┌─────────────────────┐     ┌──────────────────┐
//! │  AssistantGateway    │────▶│   LlmProvider       │────▶│  OpenAI / local  │
//! │  (echelor crate)     │     │   (Strategy)        │     │  chat endpoint   │
//! └──────────────────────┘     └─────────────────────┘     └──────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the gateway talk to OpenAI, an OpenAI-compatible
//! local server, or a test double without changing any prompt logic.

pub mod error;
pub mod message;
pub mod provider;

pub use error::{AgentError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
