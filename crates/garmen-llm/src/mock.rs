//! Mock LLM provider for testing
//!
//! Returns queued responses in FIFO order, or defaults when the queue is
//! empty. Errors can be queued to exercise failure paths.

use crate::completion::{CompletionRequest, CompletionResponse, StructuredRequest};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

enum QueuedText {
    Content(String),
    Failure(Error),
}

enum QueuedStructured {
    Value(serde_json::Value),
    Failure(Error),
}

/// A mock LLM provider that returns queued responses or default ones.
///
/// Plain-completion requests are captured so tests can assert on the
/// prompts the core actually sent.
#[derive(Default)]
pub struct MockProvider {
    text_responses: Arc<Mutex<VecDeque<QueuedText>>>,
    structured_responses: Arc<Mutex<VecDeque<QueuedStructured>>>,
    captured_completions: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain-text completion response.
    pub fn push_text(&self, content: impl Into<String>) {
        self.text_responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(QueuedText::Content(content.into()));
    }

    /// Queue a failure for the next plain-text completion.
    pub fn push_text_error(&self, error: Error) {
        self.text_responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(QueuedText::Failure(error));
    }

    /// Queue a structured completion response.
    pub fn push_structured(&self, value: serde_json::Value) {
        self.structured_responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(QueuedStructured::Value(value));
    }

    /// Queue a failure for the next structured completion.
    pub fn push_structured_error(&self, error: Error) {
        self.structured_responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(QueuedStructured::Failure(error));
    }

    /// Plain-completion requests seen so far, in order.
    #[must_use]
    pub fn captured_completions(&self) -> Vec<CompletionRequest> {
        self.captured_completions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn available_models(&self) -> Vec<String> {
        vec!["mock-model".to_string()]
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.captured_completions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        let queued = self
            .text_responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match queued {
            Some(QueuedText::Content(content)) => Ok(CompletionResponse {
                content,
                finish_reason: Some("stop".to_string()),
                model: "mock-model".to_string(),
            }),
            Some(QueuedText::Failure(error)) => Err(error),
            None => Ok(CompletionResponse {
                content: "mock response".to_string(),
                finish_reason: Some("stop".to_string()),
                model: "mock-model".to_string(),
            }),
        }
    }

    async fn complete_structured(&self, _request: StructuredRequest) -> Result<serde_json::Value> {
        let queued = self
            .structured_responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match queued {
            Some(QueuedStructured::Value(value)) => Ok(value),
            Some(QueuedStructured::Failure(error)) => Err(error),
            None => Ok(serde_json::json!({})),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_responses_fifo() {
        let mock = MockProvider::new();
        mock.push_text("first");
        mock.push_text("second");

        let a = mock.complete(CompletionRequest::new("m")).await.unwrap();
        let b = mock.complete(CompletionRequest::new("m")).await.unwrap();
        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");
    }

    #[tokio::test]
    async fn test_queued_error() {
        let mock = MockProvider::new();
        mock.push_structured_error(Error::Network("connection refused".to_string()));

        let request = StructuredRequest::new(
            CompletionRequest::new("m"),
            serde_json::json!({ "type": "object" }),
        );
        assert!(mock.complete_structured(request).await.is_err());
    }
}
