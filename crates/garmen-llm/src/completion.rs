//! Completion request and response types

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Model to use (provider-specific; empty = provider default)
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a new completion request
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add messages
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set max tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content (may be empty if the model produced no text)
    pub content: String,
    /// Finish reason
    pub finish_reason: Option<String>,
    /// Model used
    pub model: String,
}

/// Request for schema-constrained JSON output
///
/// The schema follows the OpenAPI subset Gemini accepts (`type`, `enum`,
/// `properties`, `required`, ...). Providers return the parsed JSON value.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    /// Base completion request
    pub request: CompletionRequest,
    /// JSON schema the response must conform to
    pub schema: serde_json::Value,
}

impl StructuredRequest {
    /// Create a new structured request
    #[must_use]
    pub fn new(request: CompletionRequest, schema: serde_json::Value) -> Self {
        Self { request, schema }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("gemini-2.5-flash")
            .with_message(Message::system("route this"))
            .with_message(Message::user("Buatkan invoice"))
            .with_temperature(0.1)
            .with_max_tokens(1024);

        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.1));
        assert_eq!(request.max_tokens, Some(1024));
    }

    #[test]
    fn test_structured_request() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": { "reason": { "type": "string" } },
            "required": ["reason"],
        });
        let structured =
            StructuredRequest::new(CompletionRequest::new("gemini-2.5-flash"), schema.clone());
        assert_eq!(structured.schema, schema);
    }
}
