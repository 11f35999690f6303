//! # cur-github
//!
//! GitHub REST API client for Curator.
//!
//! Wraps the handful of hosting operations the agent needs: idempotent
//! repository creation, create-or-update of a file via the contents API,
//! directory listing, file reads, and ordered multi-file write batches.
//! Nothing provider-specific beyond those calls is depended on.

mod contents;
mod error;
mod http;
mod repos;

pub use contents::FileContent;
pub use error::RepoError;

const API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

// ── Types ──────────────────────────────────────────────────────────

/// Handle to a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHandle {
    pub owner: String,
    pub name: String,
}

impl RepoHandle {
    /// `owner/name` as used in API paths.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Result of a multi-file write batch.
#[derive(Debug, Clone, Default)]
pub struct CommitResult {
    /// Paths committed, in write order.
    pub written: Vec<String>,
}

/// The repository write capability the orchestrator depends on.
///
/// Implemented by [`GitHubClient`]; tests substitute in-memory fakes.
pub trait RepoStore {
    /// Return a handle to `name`, creating the repository if absent.
    fn ensure_repository(
        &self,
        name: &str,
        description: &str,
    ) -> impl Future<Output = Result<RepoHandle, RepoError>> + Send;

    /// Commit `files` one by one, in order. On failure the error reports
    /// which paths were already written.
    fn write_files(
        &self,
        repo: &RepoHandle,
        files: &[(String, String)],
        message: &str,
    ) -> impl Future<Output = Result<CommitResult, RepoError>> + Send;

    /// Read a file, `None` when absent.
    fn get_file(
        &self,
        repo: &RepoHandle,
        path: &str,
    ) -> impl Future<Output = Result<Option<FileContent>, RepoError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// Authenticated GitHub REST client.
#[derive(Debug)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    branch: String,
}

impl GitHubClient {
    /// Create a client for `token`, committing to `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::NotConfigured`] when the token is empty.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    pub fn new(token: impl Into<String>, branch: impl Into<String>) -> Result<Self, RepoError> {
        let token = token.into();
        if token.is_empty() {
            return Err(RepoError::NotConfigured);
        }
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent("curator/0.1")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("reqwest client should build"),
            token,
            branch: branch.into(),
        })
    }

    /// Branch all writes go to.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.request(self.http.get(url))
    }

    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.request(self.http.post(url))
    }

    pub(crate) fn put(&self, url: &str) -> reqwest::RequestBuilder {
        self.request(self.http.put(url))
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Login of the token's user. Used to resolve bare repository names.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] if the request fails.
    pub async fn authenticated_user(&self) -> Result<String, RepoError> {
        #[derive(serde::Deserialize)]
        struct User {
            login: String,
        }

        let resp = self.get(&format!("{API_BASE}/user")).send().await?;
        let resp = http::check_response(resp).await?;
        let user: User = resp.json().await?;
        Ok(user.login)
    }
}

impl RepoStore for GitHubClient {
    async fn ensure_repository(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RepoHandle, RepoError> {
        Self::ensure_repository(self, name, description).await
    }

    async fn write_files(
        &self,
        repo: &RepoHandle,
        files: &[(String, String)],
        message: &str,
    ) -> Result<CommitResult, RepoError> {
        let mut written = Vec::with_capacity(files.len());
        for (path, content) in files {
            match self.put_file(repo, path, content, message).await {
                Ok(()) => written.push(path.clone()),
                Err(source) => {
                    return Err(RepoError::PartialWrite {
                        written,
                        path: path.clone(),
                        source: Box::new(source),
                    });
                }
            }
        }
        tracing::info!(repo = %repo.full_name(), files = written.len(), "committed file batch");
        Ok(CommitResult { written })
    }

    async fn get_file(
        &self,
        repo: &RepoHandle,
        path: &str,
    ) -> Result<Option<FileContent>, RepoError> {
        Self::get_file(self, repo, path).await
    }
}
