//! LLM Provider trait definition

use crate::completion::{CompletionRequest, CompletionResponse, StructuredRequest};
use crate::error::Result;

/// Trait for LLM providers
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get available models
    fn available_models(&self) -> Vec<String>;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Complete a conversation (plain text)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Complete a conversation constrained to a JSON schema
    async fn complete_structured(&self, request: StructuredRequest) -> Result<serde_json::Value>;
}
