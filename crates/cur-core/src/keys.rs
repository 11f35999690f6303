//! Slug and uniqueness-key helpers.
//!
//! Every generated application is identified by `"{category}/{slug(name)}"`.
//! The key doubles as the app's directory path inside the target repository,
//! so it must stay stable across runs.

/// Convert a human-readable name to a URL- and path-friendly slug.
///
/// Lowercases, maps whitespace and underscores to `-`, drops any other
/// non-alphanumeric character, and collapses consecutive dashes.
#[must_use]
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = true; // suppress a leading dash
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// Uniqueness key for an application: `"{category}/{slug(name)}"`.
#[must_use]
pub fn uniqueness_key(category: &str, name: &str) -> String {
    format!("{category}/{}", slug(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slug_lowercases_and_dashes() {
        assert_eq!(slug("AWS Bedrock Content Moderator"), "aws-bedrock-content-moderator");
    }

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slug("a  b__c -- d"), "a-b-c-d");
    }

    #[test]
    fn slug_drops_punctuation() {
        assert_eq!(slug("RAG (on AWS)!"), "rag-on-aws");
    }

    #[test]
    fn slug_trims_edge_dashes() {
        assert_eq!(slug("  padded name  "), "padded-name");
    }

    #[test]
    fn key_combines_category_and_slug() {
        assert_eq!(
            uniqueness_key("rag_on_aws", "Legal Document RAG Assistant"),
            "rag_on_aws/legal-document-rag-assistant"
        );
    }

    #[test]
    fn key_is_stable_across_case() {
        assert_eq!(
            uniqueness_key("bedrock_ai_agents", "My App"),
            uniqueness_key("bedrock_ai_agents", "my app")
        );
    }
}
