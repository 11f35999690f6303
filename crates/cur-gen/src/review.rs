//! Code review and bug-fix passes.
//!
//! Review emits structured [`Issue`]s from one completion; the fixer takes
//! every actionable issue for a file into a single round trip and returns
//! the rewritten code.

use cur_core::Issue;
use cur_llm::{Completion, CompletionRequest, prompts};

use crate::GenError;
use crate::extract::{extract_code_block, strip_fences};

const REVIEW_MAX_TOKENS: u32 = 2048;
const REVIEW_TEMPERATURE: f32 = 0.3;
const FIX_MAX_TOKENS: u32 = 4096;
const FIX_TEMPERATURE: f32 = 0.2;

/// Reviews one source file per call.
pub struct CodeReviewer<'a, C> {
    llm: &'a C,
}

impl<'a, C: Completion> CodeReviewer<'a, C> {
    pub const fn new(llm: &'a C) -> Self {
        Self { llm }
    }

    /// Review `code` and return the issues found, which may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Llm`] on a failed completion and
    /// [`GenError::Parse`] when the response is not a JSON issue array.
    pub async fn review(&self, file_path: &str, code: &str) -> Result<Vec<Issue>, GenError> {
        let request = CompletionRequest::new(prompts::review_prompt(file_path, code))
            .with_system(prompts::review_system_prompt())
            .with_max_tokens(REVIEW_MAX_TOKENS)
            .with_temperature(REVIEW_TEMPERATURE);
        let response = self.llm.complete(request).await?;

        let issues: Vec<Issue> =
            serde_json::from_str(strip_fences(&response)).map_err(|error| {
                GenError::Parse(format!("review response is not a JSON issue array: {error}"))
            })?;
        tracing::info!(file_path, issues = issues.len(), "review complete");
        Ok(issues)
    }
}

/// Applies fixes for actionable issues in one round trip.
pub struct BugFixer<'a, C> {
    llm: &'a C,
}

impl<'a, C: Completion> BugFixer<'a, C> {
    pub const fn new(llm: &'a C) -> Self {
        Self { llm }
    }

    /// Rewrite `code` with every issue in `issues` addressed.
    ///
    /// Callers filter to actionable severities first; this pass sends
    /// whatever it is given.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Llm`] on a failed completion.
    pub async fn fix(&self, code: &str, issues: &[Issue]) -> Result<String, GenError> {
        let request = CompletionRequest::new(prompts::fix_prompt(code, issues))
            .with_system(prompts::code_system_prompt())
            .with_max_tokens(FIX_MAX_TOKENS)
            .with_temperature(FIX_TEMPERATURE);
        let response = self.llm.complete(request).await?;
        Ok(extract_code_block(&response, "python"))
    }
}

/// The issues worth a fix pass: critical and high severity only.
#[must_use]
pub fn actionable(issues: &[Issue]) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| issue.severity.is_actionable())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLlm;
    use cur_core::{IssueKind, Severity};
    use cur_llm::LlmError;
    use pretty_assertions::assert_eq;

    const REVIEW_JSON: &str = r#"[
        {
            "severity": "critical",
            "type": "security",
            "line": 12,
            "issue": "Hardcoded AWS secret key",
            "suggestion": "Load from environment"
        },
        {
            "severity": "low",
            "type": "style",
            "line": null,
            "issue": "Missing docstring"
        }
    ]"#;

    #[tokio::test]
    async fn review_parses_issue_array() {
        let llm = ScriptedLlm::replying(REVIEW_JSON);
        let issues = CodeReviewer::new(&llm)
            .review("apps/x/app.py", "code")
            .await
            .unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].kind, IssueKind::Security);
        assert_eq!(issues[0].line, Some(12));
        // suggestion defaults to empty when absent
        assert_eq!(issues[1].suggestion, "");
    }

    #[tokio::test]
    async fn review_accepts_fenced_response_and_empty_array() {
        let llm = ScriptedLlm::replying("```json\n[]\n```");
        let issues = CodeReviewer::new(&llm).review("app.py", "code").await.unwrap();
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn review_rejects_prose_response() {
        let llm = ScriptedLlm::replying("The code looks fine to me!");
        let err = CodeReviewer::new(&llm)
            .review("app.py", "code")
            .await
            .unwrap_err();
        assert!(matches!(err, GenError::Parse(_)));
    }

    #[tokio::test]
    async fn fix_extracts_rewritten_code() {
        let llm = ScriptedLlm::replying("```python\nimport os\nkey = os.environ[\"KEY\"]\n```");
        let issues = vec![Issue {
            severity: Severity::Critical,
            kind: IssueKind::Security,
            line: Some(3),
            description: "Hardcoded key".to_string(),
            suggestion: "Use env vars".to_string(),
        }];
        let fixed = BugFixer::new(&llm).fix("key = 'abc'", &issues).await.unwrap();
        assert_eq!(fixed, "import os\nkey = os.environ[\"KEY\"]");
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn fix_propagates_llm_errors() {
        let llm = ScriptedLlm::new(vec![Err(LlmError::Api {
            status: 500,
            message: "boom".to_string(),
        })]);
        let err = BugFixer::new(&llm).fix("code", &[]).await.unwrap_err();
        assert!(matches!(err, GenError::Llm(LlmError::Api { status: 500, .. })));
    }

    #[test]
    fn actionable_keeps_high_and_critical_only() {
        let issues: Vec<Issue> = serde_json::from_str(REVIEW_JSON).unwrap();
        let kept = actionable(&issues);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].severity, Severity::Critical);
    }
}
