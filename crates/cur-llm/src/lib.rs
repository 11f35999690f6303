//! # cur-llm
//!
//! LLM provider client for Curator.
//!
//! Exposes one capability, "submit prompt text with generation parameters,
//! receive completion text", over a closed set of providers (Anthropic
//! messages API, OpenAI chat completions API). The provider is a
//! configuration value; callers never branch on it.
//!
//! No retry loop lives here. A rate-limit response surfaces as
//! [`LlmError::RateLimited`] and retry policy belongs to the caller.

pub mod prompts;

mod anthropic;
mod error;
mod http;
mod openai;

pub use error::LlmError;

use cur_config::{LlmConfig, ProviderKind};

// ── Types ──────────────────────────────────────────────────────────

/// One completion request: prompt text plus generation parameters.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system: Option<String>,
    /// `0` means the client's configured budget.
    pub max_tokens: u32,
    /// `None` means the client's configured default.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_tokens: 0,
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// The "generate text given a prompt" capability.
///
/// Implemented by [`LlmClient`]; tests substitute scripted mocks.
pub trait Completion {
    /// Submit a completion request and return the generated text.
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for a single configured LLM provider.
#[derive(Debug)]
pub struct LlmClient {
    http: reqwest::Client,
    provider: ProviderKind,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::NotConfigured`] when the config carries no API key.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.is_configured() {
            return Err(LlmError::NotConfigured);
        }
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent("curator/0.1")
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("reqwest client should build"),
            provider: config.provider,
            api_key: config.api_key.clone(),
            model: config.resolved_model().to_string(),
            max_tokens: config.resolved_max_tokens(),
            temperature: config.temperature,
        })
    }

    /// Provider this client talks to.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Model identifier sent with every request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn effective_max_tokens(&self, request: &CompletionRequest) -> u32 {
        if request.max_tokens == 0 {
            self.max_tokens
        } else {
            request.max_tokens
        }
    }

    fn effective_temperature(&self, request: &CompletionRequest) -> f32 {
        request.temperature.unwrap_or(self.temperature)
    }
}

impl Completion for LlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        tracing::debug!(
            provider = %self.provider,
            model = %self.model,
            prompt_chars = request.prompt.len(),
            "requesting completion",
        );
        match self.provider {
            ProviderKind::Anthropic => self.complete_anthropic(&request).await,
            ProviderKind::OpenAi => self.complete_openai(&request).await,
        }
    }
}
