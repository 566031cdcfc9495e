//! Install orchestration.
//!
//! One run is strictly linear: resolve the version, check the tool
//! cache, and only on a miss build the download URL, fetch the
//! artifact, mark it executable and store it. The cache check before
//! any network fetch is what makes re-runs of the same version free.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use setup_prod_core::error::{Error, Result};
use setup_prod_core::source::{ArtifactTransport, ReleaseSource};
use setup_prod_core::{Platform, ToolCache, download_url, resolve_version};

/// Configuration for a single install run.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Tool name; doubles as the release asset prefix and cache key.
    pub tool: String,
    /// Repository owner for latest-release resolution.
    pub owner: String,
    /// Artifact root URL.
    pub base_url: String,
    /// Version request: a concrete tag, `latest`, or empty.
    pub version: String,
    /// Re-download even on a cache hit.
    pub force: bool,
}

/// Outcome of a successful install.
#[derive(Debug)]
pub struct Installed {
    /// The installed binary.
    pub bin_path: PathBuf,
    /// Its containing directory, for PATH registration.
    pub bin_dir: PathBuf,
    /// The concrete version that was installed.
    pub version: String,
    /// The normalized platform the artifact was selected for.
    pub platform: Platform,
}

/// Orchestrates version resolution, cache lookup and artifact fetch.
///
/// Remote collaborators are injected so the flow runs against fakes in
/// tests; nothing here reads ambient host state.
pub struct Installer {
    config: InstallConfig,
    cache: ToolCache,
    releases: Arc<dyn ReleaseSource>,
    transport: Arc<dyn ArtifactTransport>,
}

impl Installer {
    /// Create an installer over the given cache and collaborators.
    #[must_use]
    pub fn new(
        config: InstallConfig,
        cache: ToolCache,
        releases: Arc<dyn ReleaseSource>,
        transport: Arc<dyn ArtifactTransport>,
    ) -> Self {
        Self {
            config,
            cache,
            releases,
            transport,
        }
    }

    /// Run one install for the given platform.
    ///
    /// # Errors
    ///
    /// Propagates the first failure unchanged: version resolution,
    /// locator construction, download, permissioning or cache write.
    /// No step is retried and no partial result is exposed.
    pub async fn run(&self, platform: &Platform) -> Result<Installed> {
        let version = resolve_version(
            &self.config.version,
            &self.config.owner,
            &self.config.tool,
            self.releases.as_ref(),
        )
        .await?;

        info!(%platform, %version, tool = %self.config.tool, "installing");

        let bin_name = platform.binary_name(&self.config.tool);

        if !self.config.force {
            if let Some(cached) = self.cache.lookup(&self.config.tool, &version, &bin_name) {
                info!(path = %cached.display(), "already cached");
                return self.installed(cached, version, platform);
            }
        }

        let url = download_url(&self.config.base_url, &self.config.tool, platform, &version)?;

        let scratch = tempfile::tempdir()
            .map_err(|e| Error::download(format!("creating scratch directory failed: {e}")))?;
        let downloaded = self.transport.download(&url, scratch.path()).await?;

        if !platform.is_windows() {
            make_executable(&downloaded)?;
        }

        let stored = self
            .cache
            .store(&downloaded, &bin_name, &self.config.tool, &version)?;

        match sha256_file(&stored) {
            Ok(digest) => info!(path = %stored.display(), sha256 = %digest, "installed"),
            Err(e) => debug!("skipping install digest: {e}"),
        }

        self.installed(stored, version, platform)
    }

    fn installed(&self, bin_path: PathBuf, version: String, platform: &Platform) -> Result<Installed> {
        let bin_dir = bin_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::cache_write_no_path(std::io::Error::other(
                "cached binary has no parent directory",
            )))?;
        Ok(Installed {
            bin_path,
            bin_dir,
            version,
            platform: platform.clone(),
        })
    }
}

/// Mark a downloaded binary executable (0o755).
///
/// No-op on non-Unix hosts; there the `.exe` suffix carries the
/// executable semantics instead.
fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)
            .map_err(|e| Error::permission(path, e))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).map_err(|e| Error::permission(path, e))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

/// Hex SHA256 of a file, logged for observability after an install.
fn sha256_file(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}
