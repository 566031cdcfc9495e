//! Collaborator traits for the remote side of an install.
//!
//! The installer talks to the release-listing API and the artifact
//! transport only through these traits, so orchestration logic can be
//! exercised with in-memory fakes and no host environment.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::Result;

/// A release-listing service that can name the latest release of a
/// repository.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Tag of the most recent publicly visible release of
    /// `owner/repo`.
    ///
    /// Called at most once per run, and only when the caller asked for
    /// `latest`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VersionResolution`](crate::Error::VersionResolution)
    /// when the lookup fails or the repository has no releases.
    async fn latest_tag(&self, owner: &str, repo: &str) -> Result<String>;
}

/// Transport that fetches a single artifact to a local file.
#[async_trait]
pub trait ArtifactTransport: Send + Sync {
    /// Download `url` into `dest_dir`, returning the path of the
    /// downloaded file.
    ///
    /// Called at most once per run, only on a cache miss. A single
    /// attempt; not-found and transport failures both surface as
    /// [`Error::Download`](crate::Error::Download).
    async fn download(&self, url: &Url, dest_dir: &Path) -> Result<PathBuf>;
}
