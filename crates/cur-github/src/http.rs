//! Response status handling shared by the GitHub API calls.

use reqwest::{Response, StatusCode, header};

use crate::error::RepoError;

/// Map a GitHub API response to an error unless it succeeded.
///
/// 429 becomes [`RepoError::RateLimited`], reading `Retry-After` in
/// seconds (GitHub sends it on secondary rate limits; 60 s when the
/// header is absent or unparseable). Any other non-2xx status becomes
/// [`RepoError::Api`] carrying the status code and response body.
pub async fn check_response(resp: Response) -> Result<Response, RepoError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = resp
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        return Err(RepoError::RateLimited { retry_after_secs });
    }
    if !status.is_success() {
        return Err(RepoError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
