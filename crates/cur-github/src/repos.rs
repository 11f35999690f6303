//! Repository creation and lookup.

use serde::{Deserialize, Serialize};

use crate::{API_BASE, GitHubClient, RepoHandle, error::RepoError, http::check_response};

#[derive(Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    auto_init: bool,
    has_issues: bool,
    has_wiki: bool,
}

#[derive(Deserialize)]
struct RepoResponse {
    name: String,
    owner: RepoOwner,
}

#[derive(Deserialize)]
struct RepoOwner {
    login: String,
}

impl From<RepoResponse> for RepoHandle {
    fn from(repo: RepoResponse) -> Self {
        Self {
            owner: repo.owner.login,
            name: repo.name,
        }
    }
}

impl GitHubClient {
    /// Return a handle to `name`, creating the repository if it does not
    /// exist. Idempotent: an existing repository is reused as-is.
    ///
    /// `name` is `owner/repo` or a bare name resolved against the
    /// authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] if lookup and creation both fail.
    pub async fn ensure_repository(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RepoHandle, RepoError> {
        let (owner, repo) = match name.split_once('/') {
            Some((owner, repo)) => (owner.to_string(), repo),
            None => (self.authenticated_user().await?, name),
        };

        let url = format!("{API_BASE}/repos/{owner}/{repo}");
        let resp = self.get(&url).send().await?;
        if let Some(existing) = lookup_outcome(resp).await? {
            tracing::debug!(repo = %name, "repository already exists, reusing it");
            return Ok(existing);
        }

        tracing::info!(repo = %name, "creating repository");
        let body = CreateRepoRequest {
            name: repo,
            description,
            private: false,
            auto_init: false,
            has_issues: true,
            has_wiki: false,
        };
        let resp = self
            .post(&format!("{API_BASE}/user/repos"))
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let created: RepoResponse = resp.json().await?;
        Ok(created.into())
    }
}

/// Interpret the repository lookup response: `Some` handle when the
/// repository exists (it is reused, never re-created), `None` on 404
/// (creation is required), any other failure status is an error.
async fn lookup_outcome(resp: reqwest::Response) -> Result<Option<RepoHandle>, RepoError> {
    if resp.status() == 404 {
        return Ok(None);
    }
    let resp = check_response(resp).await?;
    let existing: RepoResponse = resp.json().await?;
    Ok(Some(existing.into()))
}
