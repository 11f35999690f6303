//! Application ideas and the file sets generated from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::uniqueness_key;

/// A structured application concept produced by the idea generator.
///
/// Immutable once created; consumed by the code generator. The shape mirrors
/// the JSON the LLM is instructed to return, plus the category the idea was
/// requested for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdea {
    /// Concise application name (3-6 words).
    pub name: String,
    /// 2-3 sentence description of what the app does.
    pub description: String,
    /// Feature bullet points.
    pub features: Vec<String>,
    /// AWS service identifiers the app will use (e.g. `bedrock`, `lambda`).
    pub aws_services: Vec<String>,
    /// Primary use case or target audience.
    pub use_case: String,
    /// `beginner`, `intermediate`, or `advanced`.
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// Suggested frameworks (e.g. `streamlit`, `langchain`).
    #[serde(default)]
    pub frameworks: Vec<String>,
    /// Category the idea was generated for. Not part of the LLM response;
    /// filled in by the idea generator.
    #[serde(default)]
    pub category: String,
}

fn default_difficulty() -> String {
    "intermediate".to_string()
}

impl AppIdea {
    /// Uniqueness key for registry deduplication: `"{category}/{slug(name)}"`.
    #[must_use]
    pub fn key(&self) -> String {
        uniqueness_key(&self.category, &self.name)
    }

    /// The framework used for the main application file.
    ///
    /// Falls back to `streamlit` when the idea names none.
    #[must_use]
    pub fn primary_framework(&self) -> &str {
        self.frameworks.first().map_or("streamlit", String::as_str)
    }
}

/// The file set produced for one idea, in write order.
///
/// `files` is ordered code → docs → infra so a partial repository write
/// leaves a coherent subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedApplication {
    pub idea: AppIdea,
    /// Relative path (within the app directory) to file content, in the
    /// order the files must be committed.
    pub files: Vec<(String, String)>,
    pub created_at: DateTime<Utc>,
}

impl GeneratedApplication {
    /// Repository directory for this application: its uniqueness key.
    #[must_use]
    pub fn repo_path(&self) -> String {
        self.idea.key()
    }

    /// File paths in commit order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(path, _)| path.as_str())
    }
}
