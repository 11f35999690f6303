//! LLM provider configuration.

use serde::{Deserialize, Serialize};

/// Which LLM provider the client talks to. Closed set, selected by
/// configuration rather than runtime type inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    OpenAi,
}

impl ProviderKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }

    /// Default model identifier for the provider.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5-20250929",
            Self::OpenAi => "gpt-4-turbo",
        }
    }

    /// Default max-tokens budget for the provider.
    #[must_use]
    pub const fn default_max_tokens(self) -> u32 {
        match self {
            Self::Anthropic => 8192,
            Self::OpenAi => 4096,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_temperature() -> f32 {
    0.7
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Provider to use (`anthropic` or `openai`).
    #[serde(default)]
    pub provider: ProviderKind,

    /// API key for the provider.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier. Empty means the provider's default model.
    #[serde(default)]
    pub model: String,

    /// Max tokens per completion. `0` means the provider's default budget.
    #[serde(default)]
    pub max_tokens: u32,

    /// Default sampling temperature. Individual calls may override this.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: String::new(),
            model: String::new(),
            max_tokens: 0,
            temperature: default_temperature(),
        }
    }
}

impl LlmConfig {
    /// Check if the LLM config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// The model to use: configured value or the provider default.
    #[must_use]
    pub fn resolved_model(&self) -> &str {
        if self.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }

    /// The max-tokens budget: configured value or the provider default.
    #[must_use]
    pub const fn resolved_max_tokens(&self) -> u32 {
        if self.max_tokens == 0 {
            self.provider.default_max_tokens()
        } else {
            self.max_tokens
        }
    }
}
