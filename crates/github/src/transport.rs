//! HTTP artifact transport.

use async_trait::async_trait;
use setup_prod_core::error::{Error, Result};
use setup_prod_core::source::ArtifactTransport;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Single-attempt HTTP downloader for release artifacts.
pub struct HttpTransport {
    client: reqwest::Client,
    token: Option<String>,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Create an unauthenticated transport.
    ///
    /// # Panics
    ///
    /// Panics when the HTTP client cannot be constructed; with default
    /// TLS settings that indicates a broken environment.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("setup-prod")
                .build()
                .expect("failed to create HTTP client - TLS backend initialization failed"),
            token: None,
        }
    }

    /// Set the bearer token sent with the download request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

/// File name for a downloaded artifact, taken from the URL's final
/// path segment.
fn artifact_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or("artifact")
        .to_string()
}

#[async_trait]
impl ArtifactTransport for HttpTransport {
    async fn download(&self, url: &Url, dest_dir: &Path) -> Result<PathBuf> {
        debug!(%url, "downloading artifact");

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::download(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::download(format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::download(format!("reading body of {url} failed: {e}")))?;

        let dest = dest_dir.join(artifact_file_name(url));
        tokio::fs::write(&dest, &bytes)
            .await
            .map_err(|e| Error::download(format!("writing {} failed: {e}", dest.display())))?;

        debug!(path = %dest.display(), bytes = bytes.len(), "downloaded artifact");
        Ok(dest)
    }
}
