//! Google Gemini provider
//!
//! REST client for `generativelanguage.googleapis.com` with API-key auth.
//!
//! # Module Structure
//!
//! - `config`: provider configuration (env-driven)
//! - `types`: wire types (camelCase request/response)
//! - `convert`: `Message` → Gemini content conversion
//! - `provider`: HTTP client, schema sanitization, `LlmProvider` impl

mod config;
mod convert;
mod provider;
mod types;


pub use config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, MODELS};
pub use provider::GeminiProvider;
