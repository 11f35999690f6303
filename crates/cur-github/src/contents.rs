//! Contents API: file reads, directory listings, create-or-update writes.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::{API_BASE, GitHubClient, RepoHandle, error::RepoError, http::check_response};

/// A file read from the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub content: String,
    /// Blob SHA, required for updates.
    pub sha: String,
}

#[derive(Deserialize)]
struct ContentsEntry {
    path: String,
    sha: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct PutFileRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

impl GitHubClient {
    fn contents_url(repo: &RepoHandle, path: &str) -> String {
        // Path segments may contain spaces; escape each segment, keep the
        // separators.
        let escaped = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{API_BASE}/repos/{}/{}/contents/{escaped}",
            repo.owner, repo.name
        )
    }

    /// Read a file. Returns `None` when the path does not exist or is a
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] on transport/API failure or undecodable content.
    pub async fn get_file(
        &self,
        repo: &RepoHandle,
        path: &str,
    ) -> Result<Option<FileContent>, RepoError> {
        let url = Self::contents_url(repo, path);
        let resp = self
            .get(&url)
            .query(&[("ref", self.branch())])
            .send()
            .await?;
        if resp.status() == 404 {
            return Ok(None);
        }
        let resp = check_response(resp).await?;

        let entry: serde_json::Value = resp.json().await?;
        if entry.is_array() {
            // Directory listing, not a file.
            return Ok(None);
        }
        let entry: ContentsEntry = serde_json::from_value(entry)
            .map_err(|e| RepoError::Decode(format!("contents entry: {e}")))?;
        let Some(encoded) = entry.content else {
            return Ok(None);
        };
        let decoded = decode_content(&encoded)?;
        Ok(Some(FileContent {
            content: decoded,
            sha: entry.sha,
        }))
    }

    /// List entry paths directly under `path` (`""` for the repo root).
    /// A missing directory is an empty listing.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] on transport/API failure.
    pub async fn list_dir(&self, repo: &RepoHandle, path: &str) -> Result<Vec<String>, RepoError> {
        let url = Self::contents_url(repo, path);
        let resp = self
            .get(&url)
            .query(&[("ref", self.branch())])
            .send()
            .await?;
        if resp.status() == 404 {
            return Ok(Vec::new());
        }
        let resp = check_response(resp).await?;

        let entries: Vec<ContentsEntry> = resp.json().await?;
        Ok(entries.into_iter().map(|entry| entry.path).collect())
    }

    /// Create or update one file. Existing files are looked up first so the
    /// update carries the current blob SHA.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] on transport/API failure.
    pub async fn put_file(
        &self,
        repo: &RepoHandle,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<(), RepoError> {
        let existing_sha = self.get_file(repo, path).await?.map(|file| file.sha);
        let updating = existing_sha.is_some();

        let body = PutFileRequest {
            message,
            content: BASE64.encode(content.as_bytes()),
            branch: self.branch(),
            sha: existing_sha,
        };
        let url = Self::contents_url(repo, path);
        let resp = self.put(&url).json(&body).send().await?;
        check_response(resp).await?;

        tracing::debug!(repo = %repo.full_name(), path, updating, "wrote file");
        Ok(())
    }
}

fn decode_content(encoded: &str) -> Result<String, RepoError> {
    // The API wraps base64 payloads with newlines.
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact)
        .map_err(|e| RepoError::Decode(format!("base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| RepoError::Decode(format!("utf-8: {e}")))
}
