//! OpenRouter-backed plan generator
//!
//! Implements the PlanGenerator trait against the OpenRouter chat completions
//! API. Replies frequently arrive wrapped in markdown code fences; those are
//! stripped before the schedule JSON is parsed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::domain::Schedule;
use crate::engine::Violation;
use crate::planner::generator::{GeneratorError, PlanGenerator};
use crate::planner::prompt;
use crate::planner::request::PlanRequest;

/// OpenRouter chat completions endpoint
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Environment variable holding the API key
const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Default model to use
const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:free";

/// Default max tokens for a schedule response
const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Configuration for the OpenRouter generator
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(120),
        }
    }
}

impl OpenRouterConfig {
    /// Create a config with a specific model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

/// OpenRouter API client implementing the generator capability
pub struct OpenRouterGenerator {
    client: Client,
    api_key: String,
    config: OpenRouterConfig,
}

impl OpenRouterGenerator {
    /// Create a new generator, reading the API key from the environment.
    pub fn new(config: OpenRouterConfig) -> Result<Self, GeneratorError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| GeneratorError::MissingApiKey(API_KEY_ENV.to_string()))?;
        Self::with_api_key(api_key, config)
    }

    /// Create a generator with an explicit API key.
    pub fn with_api_key(api_key: String, config: OpenRouterConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Build the chat completions request body.
    fn build_request(&self, prompt_text: &str) -> Value {
        json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [
                {"role": "user", "content": prompt_text}
            ],
            "response_format": {"type": "json_object"}
        })
    }

    /// Pull the assistant text out of a chat completions response.
    fn response_text(body: &Value) -> Result<&str, GeneratorError> {
        body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GeneratorError::MalformedResponse("response carried no message content".to_string())
            })
    }
}

/// Strip a wrapping markdown code fence, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(inner) = trimmed
        .strip_prefix("```json")
        .and_then(|rest| rest.strip_suffix("```"))
    {
        inner.trim()
    } else if let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    {
        inner.trim()
    } else {
        trimmed
    }
}

/// Parse generator output into a schedule, tolerating fenced replies.
pub fn extract_schedule(text: &str) -> Result<Schedule, GeneratorError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(cleaned)
        .map_err(|e| GeneratorError::MalformedResponse(format!("{}: {}", e, cleaned)))
}

#[async_trait]
impl PlanGenerator for OpenRouterGenerator {
    async fn generate(
        &self,
        request: &PlanRequest,
        feedback: &[Violation],
    ) -> Result<Schedule, GeneratorError> {
        let prompt_text = prompt::render(request, feedback);
        let body = self.build_request(&prompt_text);

        log::debug!("calling {} with model {}", OPENROUTER_API_URL, self.config.model);

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout(self.config.timeout)
                } else {
                    GeneratorError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let text = Self::response_text(&body)?;
        extract_schedule(text)
    }
}
