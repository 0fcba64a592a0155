// src/github/fetch.rs
// =============================================================================
// The Fetcher stage: asks the GitHub API for a repository's README.
//
// Endpoint: GET {api_base}/repos/{owner}/{repo}/readme
//
// The API answers with JSON metadata whose `content` field holds the file
// itself, base64-encoded. Decoding happens in the next stage (readme/decode.rs).
//
// Status handling:
// - 2xx      -> ReadmePayload
// - 404      -> ReadmeError::NotFound
// - anything else, or a transport failure -> ReadmeError::Fetch
//
// There is exactly one attempt per call; retrying is up to the user.
// =============================================================================

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use super::GithubClient;
use crate::error::ReadmeError;

// Which README to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeRequest {
    pub owner: String,
    pub repo: String,
}

impl ReadmeRequest {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

// The part of the README API response we care about.
// Both fields may be missing; the decoder deals with that.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadmePayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl GithubClient {
    // Performs the single README request for `request`
    pub async fn fetch_readme(&self, request: &ReadmeRequest) -> Result<ReadmePayload, ReadmeError> {
        let url = format!(
            "{}/repos/{}/{}/readme",
            self.api_base, request.owner, request.repo
        );
        debug!(%url, "fetching README metadata");

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "README request failed");
            ReadmeError::Fetch { reason: e.to_string() }
        })?;

        check_status(response.status())?;

        response.json::<ReadmePayload>().await.map_err(|e| {
            warn!(%url, error = %e, "README response was not valid JSON");
            ReadmeError::Fetch { reason: e.to_string() }
        })
    }
}

// Maps an HTTP status to the pipeline's error taxonomy
fn check_status(status: StatusCode) -> Result<(), ReadmeError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(ReadmeError::NotFound)
    } else {
        warn!(status = status.as_u16(), "README endpoint returned an error status");
        Err(ReadmeError::Fetch {
            reason: format!("HTTP {}", status.as_u16()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::github::test_server::{closed_port, serve_once};

    fn client_for(api_base: String) -> GithubClient {
        let config = SiteConfig {
            api_base,
            ..SiteConfig::default()
        };
        GithubClient::new(&config).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert_eq!(check_status(StatusCode::NOT_FOUND), Err(ReadmeError::NotFound));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN),
            Err(ReadmeError::Fetch { .. })
        ));
        assert!(matches!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ReadmeError::Fetch { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_returns_payload() {
        let base = serve_once("200 OK", r#"{"content":"SGVsbG8=","encoding":"base64"}"#).await;
        let payload = client_for(base)
            .fetch_readme(&ReadmeRequest::new("bar", "foo"))
            .await
            .unwrap();
        assert_eq!(payload.content.as_deref(), Some("SGVsbG8="));
        assert_eq!(payload.encoding.as_deref(), Some("base64"));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let base = serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;
        let err = client_for(base)
            .fetch_readme(&ReadmeRequest::new("bar", "missing"))
            .await
            .unwrap_err();
        assert_eq!(err, ReadmeError::NotFound);
        assert_eq!(err.to_string(), "README.md not found in this repository.");
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let base = serve_once("500 Internal Server Error", "{}").await;
        let err = client_for(base)
            .fetch_readme(&ReadmeRequest::new("bar", "foo"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReadmeError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_transport_failure() {
        let err = client_for(closed_port().await)
            .fetch_readme(&ReadmeRequest::new("bar", "foo"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReadmeError::Fetch { .. }));
    }
}
