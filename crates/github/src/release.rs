//! GitHub Releases client.
//!
//! Implements [`ReleaseSource`] over the REST API's
//! `releases/latest` endpoint. One request, no pagination; only the
//! single newest release is ever needed.

use async_trait::async_trait;
use serde::Deserialize;
use setup_prod_core::error::{Error, Result};
use setup_prod_core::source::ReleaseSource;
use tracing::debug;

/// Default API root for github.com.
pub const GITHUB_API: &str = "https://api.github.com";

/// GitHub release metadata from the API.
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Release-listing client for GitHub.
pub struct GitHubReleases {
    client: reqwest::Client,
    api_root: String,
    token: Option<String>,
}

impl Default for GitHubReleases {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubReleases {
    /// Create an unauthenticated client against github.com.
    ///
    /// # Panics
    ///
    /// Panics when the HTTP client cannot be constructed, which with
    /// default TLS settings indicates a broken environment rather than
    /// a recoverable error.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("setup-prod")
                .build()
                .expect("failed to create HTTP client - TLS backend initialization failed"),
            api_root: GITHUB_API.to_string(),
            token: None,
        }
    }

    /// Set the bearer token for private repositories and rate limits.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Override the API root. Used by tests to point at a local server.
    #[must_use]
    pub fn with_api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = root.into();
        self
    }

    fn latest_release_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_root.trim_end_matches('/'),
            owner,
            repo
        )
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    async fn latest_tag(&self, owner: &str, repo: &str) -> Result<String> {
        let url = self.latest_release_url(owner, repo);
        debug!(%url, "fetching latest release");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::version_resolution(format!("release lookup failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::version_resolution(format!(
                "no latest release for {}/{} (HTTP {})",
                owner,
                repo,
                response.status()
            )));
        }

        let release: Release = response
            .json()
            .await
            .map_err(|e| Error::version_resolution(format!("malformed release payload: {e}")))?;

        if release.tag_name.is_empty() {
            return Err(Error::version_resolution(format!(
                "latest release of {owner}/{repo} has no tag"
            )));
        }

        Ok(release.tag_name)
    }
}
