//! LLM provider abstraction for the Garmen SIA assistant
//!
//! This crate defines the provider-facing types the orchestration core
//! consumes, plus the Gemini REST implementation:
//!
//! - `provider`: the `LlmProvider` trait (plain + schema-constrained output)
//! - `message` / `completion`: conversation and request/response types
//! - `gemini`: Google Gemini provider (API key auth)
//! - `mock`: queueing mock provider for tests
//!
//! The core never talks HTTP directly; everything goes through `LlmProvider`.

pub mod completion;
pub mod error;
pub mod gemini;
pub mod message;
pub mod mock;
pub mod provider;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, StructuredRequest};
pub use error::{Error, Result};
pub use gemini::{GeminiConfig, GeminiProvider};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use provider::LlmProvider;
