//! Iteration reports returned by the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which stage of per-item processing a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    IdeaGeneration,
    CodeGeneration,
    Review,
    Fix,
    Commit,
}

impl FailureStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdeaGeneration => "idea_generation",
            Self::CodeGeneration => "code_generation",
            Self::Review => "review",
            Self::Fix => "fix",
            Self::Commit => "commit",
        }
    }
}

/// A recorded per-item failure. The run continues past these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub stage: FailureStage,
    /// Which idea or application the failure belongs to, when known.
    pub subject: Option<String>,
    pub message: String,
}

/// Summary of one iteration: what succeeded, what failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IterationReport {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Names of newly generated and committed applications.
    pub new_apps: Vec<String>,
    /// `"{app}: N issue(s) fixed"` entries for patched applications.
    pub bugs_fixed: Vec<String>,
    /// Applications reviewed with no actionable issues.
    pub reviewed_clean: Vec<String>,
    pub failures: Vec<ItemFailure>,
}

impl IterationReport {
    /// Render the report as the markdown summary printed after a run.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Iteration Summary\n\n");
        Self::push_section(&mut out, "New Applications", &self.new_apps);
        Self::push_section(&mut out, "Bugs Fixed", &self.bugs_fixed);
        Self::push_section(&mut out, "Reviewed Clean", &self.reviewed_clean);

        out.push_str(&format!("## Failures ({})\n", self.failures.len()));
        if self.failures.is_empty() {
            out.push_str("*None*\n");
        } else {
            for failure in &self.failures {
                let subject = failure.subject.as_deref().unwrap_or("unknown");
                out.push_str(&format!(
                    "- [{}] {subject}: {}\n",
                    failure.stage.as_str(),
                    failure.message
                ));
            }
        }

        if let Some(finished) = self.finished_at {
            out.push_str(&format!("\n---\n*Generated at {}*\n", finished.to_rfc3339()));
        }
        out
    }

    fn push_section(out: &mut String, title: &str, items: &[String]) {
        out.push_str(&format!("## {title} ({})\n", items.len()));
        if items.is_empty() {
            out.push_str("*None*\n");
        } else {
            for item in items {
                out.push_str(&format!("- {item}\n"));
            }
        }
        out.push('\n');
    }

    /// Commit message describing this iteration, in conventional style.
    #[must_use]
    pub fn commit_message(&self) -> String {
        let mut parts = Vec::new();
        if !self.new_apps.is_empty() {
            parts.push(format!("add {} new app(s)", self.new_apps.len()));
        }
        if !self.bugs_fixed.is_empty() {
            parts.push(format!("fix {} app(s)", self.bugs_fixed.len()));
        }
        if parts.is_empty() {
            return "chore: daily repository maintenance".to_string();
        }

        let mut message = format!("feat: {}", parts.join(", "));
        if !self.new_apps.is_empty() {
            message.push_str("\n\nNew applications:");
            for app in &self.new_apps {
                message.push_str(&format!("\n- {app}"));
            }
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_report_renders_placeholder_sections() {
        let report = IterationReport::default();
        let md = report.to_markdown();
        assert!(md.contains("## New Applications (0)"));
        assert!(md.contains("*None*"));
    }

    #[test]
    fn report_lists_apps_and_failures() {
        let report = IterationReport {
            new_apps: vec!["Invoice Extractor".to_string()],
            failures: vec![ItemFailure {
                stage: FailureStage::IdeaGeneration,
                subject: Some("serverless_ai_apps".to_string()),
                message: "response was not valid JSON".to_string(),
            }],
            ..Default::default()
        };
        let md = report.to_markdown();
        assert!(md.contains("- Invoice Extractor"));
        assert!(md.contains("[idea_generation] serverless_ai_apps"));
    }

    #[test]
    fn commit_message_for_empty_run_is_chore() {
        assert_eq!(
            IterationReport::default().commit_message(),
            "chore: daily repository maintenance"
        );
    }

    #[test]
    fn commit_message_lists_new_apps() {
        let report = IterationReport {
            new_apps: vec!["A".to_string(), "B".to_string()],
            bugs_fixed: vec!["C: 2 issue(s) fixed".to_string()],
            ..Default::default()
        };
        let msg = report.commit_message();
        assert!(msg.starts_with("feat: add 2 new app(s), fix 1 app(s)"));
        assert!(msg.contains("- A"));
        assert!(msg.contains("- B"));
    }
}
