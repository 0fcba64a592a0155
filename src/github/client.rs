// src/github/client.rs
// =============================================================================
// A thin wrapper around one reqwest::Client, configured for the GitHub API.
//
// We create the client once and reuse it for every request (connection
// pooling). GitHub rejects requests without a User-Agent, so we always send one.
// =============================================================================

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use crate::config::SiteConfig;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GithubClient {
    pub(super) http: Client,
    pub(super) api_base: String,
}

impl GithubClient {
    // Builds a client for the API host named in the config.
    // No timeout is set on purpose: requests use the transport defaults.
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// The underlying HTTP client, shared with the contact form
    pub fn http(&self) -> &Client {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = SiteConfig {
            api_base: "https://api.example.com/".into(),
            ..SiteConfig::default()
        };
        let client = GithubClient::new(&config).unwrap();
        assert_eq!(client.api_base, "https://api.example.com");
    }
}
