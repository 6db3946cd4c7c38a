//! Gemini provider implementation

use super::config::GeminiConfig;
use super::convert::convert_messages;
use super::types::{GeminiError, GeminiRequest, GeminiResponse, GenerationConfig};
use crate::completion::{CompletionRequest, CompletionResponse, StructuredRequest};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;
use crate::util::sanitize_api_error;
use reqwest::Client;
use tracing::{debug, warn};

/// Google Gemini provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

/// Drop schema keywords outside Gemini's OpenAPI subset, at every nesting
/// level. The routing schema is plain (`type`/`enum`/`properties`/`required`
/// plus `description`), but a caller-supplied schema may carry keywords like
/// `additionalProperties` or `$schema` that Gemini rejects with a 400
/// INVALID_ARGUMENT.
fn sanitize_response_schema(schema: &mut serde_json::Value) {
    match schema {
        serde_json::Value::Object(map) => {
            map.retain(|key, _| {
                !matches!(key.as_str(), "additionalProperties" | "default" | "$schema")
            });
            map.values_mut().for_each(sanitize_response_schema);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(sanitize_response_schema),
        _ => {}
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    fn resolve_model<'a>(&'a self, requested: &'a str) -> &'a str {
        if requested.is_empty() {
            &self.config.default_model
        } else {
            requested
        }
    }

    pub(super) fn build_request(
        &self,
        request: &CompletionRequest,
        schema: Option<serde_json::Value>,
    ) -> GeminiRequest {
        let (system_instruction, contents) = convert_messages(&request.messages);

        let response_schema = schema.map(|mut s| {
            sanitize_response_schema(&mut s);
            s
        });
        let response_mime_type = response_schema
            .as_ref()
            .map(|_| "application/json".to_string());

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: Some(
                    request.max_tokens.unwrap_or(self.config.default_max_tokens),
                ),
                response_mime_type,
                response_schema,
            }),
        }
    }

    /// Send request to Gemini API (with short retry on 429 / 5xx)
    async fn send_request(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        const MAX_RETRIES: u32 = 2;

        for attempt in 0..=MAX_RETRIES {
            match self.send_request_once(model, request).await {
                Ok(response) => return Ok(response),
                Err(Error::RateLimit) if attempt < MAX_RETRIES => {
                    let delay_secs = 2 + u64::from(attempt) * 2;
                    warn!(attempt = attempt + 1, model, delay_secs, "Gemini rate limited, retrying");
                    tokio::time::sleep(std::time::Duration::from_secs(delay_secs)).await;
                }
                Err(Error::ServerError(message)) if attempt < MAX_RETRIES => {
                    let delay_secs = 2 + u64::from(attempt) * 3;
                    warn!(
                        attempt = attempt + 1,
                        model,
                        delay_secs,
                        error = %message,
                        "Gemini server error, retrying"
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(delay_secs)).await;
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::RateLimit)
    }

    /// Single attempt to send request to Gemini API.
    async fn send_request_once(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        // Don't log the full URL (contains the API key)
        debug!(model, "Sending request to Gemini");

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.config.timeout.as_millis() as u64)
                } else {
                    Error::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(status = %status, "Gemini API error response");
            if let Ok(error) = serde_json::from_str::<GeminiError>(&body) {
                warn!(
                    error_status = %error.error.status,
                    error_code = error.error.code,
                    "Gemini API error detail"
                );
                if status.as_u16() == 429 {
                    return Err(Error::RateLimit);
                }
                if status.is_server_error() {
                    return Err(Error::ServerError(sanitize_api_error(&format!(
                        "{}: {}",
                        error.error.status, error.error.message
                    ))));
                }
                return Err(Error::Api(sanitize_api_error(&format!(
                    "{}: {}",
                    error.error.status, error.error.message
                ))));
            }
            if status.as_u16() == 429 {
                return Err(Error::RateLimit);
            }
            if status.is_server_error() {
                return Err(Error::ServerError(format!("HTTP {status}")));
            }
            // Don't expose the raw HTTP response body
            return Err(Error::Api(sanitize_api_error(&format!("HTTP {status}"))));
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn available_models(&self) -> Vec<String> {
        super::config::MODELS.iter().map(|s| (*s).to_string()).collect()
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = self.resolve_model(&request.model).to_string();
        let gemini_request = self.build_request(&request, None);
        let response = self.send_request(&model, &gemini_request).await?;

        Ok(CompletionResponse {
            content: response.text(),
            finish_reason: response.finish_reason(),
            model: response.model_version.unwrap_or(model),
        })
    }

    async fn complete_structured(&self, request: StructuredRequest) -> Result<serde_json::Value> {
        let model = self.resolve_model(&request.request.model).to_string();
        let gemini_request = self.build_request(&request.request, Some(request.schema));
        let response = self.send_request(&model, &gemini_request).await?;

        let text = response.text();
        serde_json::from_str(&text)
            .map_err(|e| Error::InvalidResponse(format!("structured output is not JSON: {e}")))
    }
}
