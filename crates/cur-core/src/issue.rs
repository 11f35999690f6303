//! Review issues reported by the code reviewer.

use serde::{Deserialize, Serialize};

/// Severity of a review finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Whether this severity warrants an automated fix pass.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// Kind of a review finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Bug,
    Security,
    Performance,
    Style,
}

/// A single finding from a review pass.
///
/// Shape matches the JSON array the reviewer prompt asks the model for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Line number the model attributed the issue to, when it gave one.
    #[serde(default)]
    pub line: Option<u32>,
    /// Description of the issue.
    #[serde(rename = "issue")]
    pub description: String,
    /// Suggested fix.
    #[serde(default)]
    pub suggestion: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn only_high_and_critical_are_actionable() {
        assert!(Severity::Critical.is_actionable());
        assert!(Severity::High.is_actionable());
        assert!(!Severity::Medium.is_actionable());
        assert!(!Severity::Low.is_actionable());
    }

    #[test]
    fn issue_parses_reviewer_output_shape() {
        let json = r#"[
            {
                "severity": "critical",
                "type": "security",
                "line": 42,
                "issue": "Hardcoded AWS credentials",
                "suggestion": "Load credentials from environment variables"
            },
            {
                "severity": "low",
                "type": "style",
                "issue": "Unused import"
            }
        ]"#;
        let issues: Vec<Issue> = serde_json::from_str(json).expect("issues should parse");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].kind, IssueKind::Security);
        assert_eq!(issues[0].line, Some(42));
        assert_eq!(issues[1].line, None);
        assert_eq!(issues[1].suggestion, "");
    }
}
