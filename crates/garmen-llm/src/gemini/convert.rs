//! Message conversion to Gemini wire format

use super::types::{GeminiContent, GeminiPart};
use crate::message::{Message, MessageRole};

/// Split messages into an optional system instruction and Gemini contents.
///
/// Gemini carries the system prompt in a dedicated `systemInstruction` field
/// rather than in `contents`; assistant turns use the role `"model"`.
pub(crate) fn convert_messages(messages: &[Message]) -> (Option<GeminiContent>, Vec<GeminiContent>) {
    let mut system_parts = Vec::new();
    let mut contents = Vec::new();

    for message in messages {
        match message.role {
            MessageRole::System => {
                system_parts.push(GeminiPart {
                    text: message.content.clone(),
                });
            }
            MessageRole::User => contents.push(GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: message.content.clone(),
                }],
            }),
            MessageRole::Assistant => contents.push(GeminiContent {
                role: Some("model".to_string()),
                parts: vec![GeminiPart {
                    text: message.content.clone(),
                }],
            }),
        }
    }

    let system_instruction = if system_parts.is_empty() {
        None
    } else {
        Some(GeminiContent {
            role: None,
            parts: system_parts,
        })
    };

    (system_instruction, contents)
}
