//! Category and AWS service catalog entries.
//!
//! Loaded from configuration, read-only during a run. Priorities bias idea
//! sampling: higher priority and fewer existing apps both raise a category's
//! weight.

use serde::{Deserialize, Serialize};

/// An application category the agent generates ideas for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Directory-safe identifier (e.g. `bedrock_ai_agents`).
    pub name: String,
    /// Human-readable description, embedded in prompts and seeded READMEs.
    pub description: String,
    /// Sampling priority; higher is picked more often.
    #[serde(default = "default_priority")]
    pub priority: u32,
}

/// An AWS service the generated apps may build on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsService {
    /// Short identifier used in prompts and idea JSON (e.g. `bedrock`).
    pub key: String,
    /// Display name (e.g. `Amazon Bedrock`).
    pub name: String,
    /// Typical use cases, embedded in prompts.
    #[serde(default)]
    pub use_cases: Vec<String>,
    /// Sampling priority; higher is picked more often.
    #[serde(default = "default_priority")]
    pub priority: u32,
}

const fn default_priority() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_priority_defaults_to_one() {
        let cat: Category = toml::from_str(
            r#"
            name = "rag_on_aws"
            description = "RAG applications with AWS services"
            "#,
        )
        .expect("category should parse");
        assert_eq!(cat.priority, 1);
    }

    #[test]
    fn service_parses_full_shape() {
        let svc: AwsService = toml::from_str(
            r#"
            key = "bedrock"
            name = "Amazon Bedrock"
            use_cases = ["LLM inference", "RAG", "Agents"]
            priority = 3
            "#,
        )
        .expect("service should parse");
        assert_eq!(svc.key, "bedrock");
        assert_eq!(svc.use_cases.len(), 3);
        assert_eq!(svc.priority, 3);
    }
}
