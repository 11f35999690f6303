//! GitHub API configuration.

use serde::{Deserialize, Serialize};

fn default_target_repo() -> String {
    "awesome-aws-ai-apps".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Personal access token used for all API calls.
    #[serde(default)]
    pub token: String,

    /// Target repository, either `owner/repo` or a bare name (resolved
    /// against the authenticated user).
    #[serde(default = "default_target_repo")]
    pub target_repo: String,

    /// Branch commits are written to.
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            target_repo: default_target_repo(),
            branch: default_branch(),
        }
    }
}

impl GithubConfig {
    /// Check if the GitHub config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }

    /// Split `target_repo` into `(owner, repo)` when it carries an owner.
    #[must_use]
    pub fn split_target(&self) -> (Option<&str>, &str) {
        match self.target_repo.split_once('/') {
            Some((owner, repo)) => (Some(owner), repo),
            None => (None, self.target_repo.as_str()),
        }
    }
}
