//! Fluent configuration for the assistant core.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::backends::google::GoogleGemini;
use crate::error::AssistantError;
use crate::session::SessionManager;

/// Environment variable consulted when no explicit API key is supplied.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Builder for configuring and instantiating the assistant core.
///
/// An explicitly supplied API key takes precedence over the
/// [`API_KEY_ENV`] environment variable; absence of both is a
/// configuration failure raised from [`build`](AssistantBuilder::build)
/// before any network attempt.
#[derive(Default)]
pub struct AssistantBuilder {
    api_key: Option<SecretString>,
    model: Option<String>,
    base_url: Option<String>,
    max_output_tokens: Option<u32>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    top_k: Option<u32>,
    timeout_seconds: Option<u64>,
    system: Option<String>,
    review_instruction: Option<String>,
}

impl AssistantBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Sets the model identifier to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the base URL for API requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Sets the temperature for controlling response randomness.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the top_p sampling parameter.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the top_k sampling parameter.
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Sets the system instruction sent with every request.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Replaces the shipped plan-review instruction.
    pub fn review_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.review_instruction = Some(instruction.into());
        self
    }

    /// Resolves credentials and builds the [`SessionManager`].
    pub fn build(self) -> Result<SessionManager, AssistantError> {
        let api_key = resolve_api_key(self.api_key, std::env::var(API_KEY_ENV).ok())?;
        log::debug!(
            "building session manager: model={:?} base_url={:?}",
            self.model,
            self.base_url
        );

        let gateway = GoogleGemini::new(
            api_key.expose_secret().as_str(),
            self.model,
            self.base_url,
            self.max_output_tokens,
            self.temperature,
            self.top_p,
            self.top_k,
            self.timeout_seconds,
            self.system,
        )?;

        let mut manager = SessionManager::new(Arc::new(gateway));
        if let Some(instruction) = self.review_instruction {
            manager = manager.with_review_instruction(instruction);
        }
        Ok(manager)
    }
}

fn resolve_api_key(
    explicit: Option<SecretString>,
    env: Option<String>,
) -> Result<SecretString, AssistantError> {
    if let Some(key) = explicit {
        return Ok(key);
    }
    match env {
        Some(value) if !value.trim().is_empty() => Ok(SecretString::new(value)),
        _ => Err(AssistantError::Configuration(format!(
            "No API key provided and {API_KEY_ENV} is not set"
        ))),
    }
}
