//! Local tool cache keyed by (tool name, version).
//!
//! The cache is what makes installs idempotent: the installer always
//! consults [`ToolCache::lookup`] before any network fetch, and a
//! second run for the same version finds the binary already in place.
//! Entries are never deleted by this crate; eviction belongs to
//! whoever owns the cache root.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// A persistent key→path store under a single cache root.
///
/// Layout: `<root>/<name>/<version>/<binary>`.
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
}

impl ToolCache {
    /// Create a cache over the given root directory.
    ///
    /// The root is not created until the first [`store`](Self::store).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the entry for (name, version).
    fn entry_dir(&self, name: &str, version: &str) -> PathBuf {
        self.root.join(name).join(version)
    }

    /// Look up a cached binary. Side-effect free.
    ///
    /// Returns the path only when the binary actually exists on disk,
    /// so a half-created entry directory never counts as a hit.
    #[must_use]
    pub fn lookup(&self, name: &str, version: &str, bin_name: &str) -> Option<PathBuf> {
        let path = self.entry_dir(name, version).join(bin_name);
        if path.is_file() {
            debug!(path = %path.display(), "tool cache hit");
            Some(path)
        } else {
            debug!(name, version, "tool cache miss");
            None
        }
    }

    /// Move `src` into the cache under (name, version) as `bin_name`,
    /// returning the final path.
    ///
    /// Takes ownership of the source file. A rename is attempted first;
    /// when the source lives on a different filesystem the entry is
    /// copied and the source removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheWrite`] when the cache root cannot be
    /// written.
    pub fn store(
        &self,
        src: &Path,
        bin_name: &str,
        name: &str,
        version: &str,
    ) -> Result<PathBuf> {
        let dir = self.entry_dir(name, version);
        fs::create_dir_all(&dir).map_err(|e| Error::cache_write(&dir, e))?;

        let dest = dir.join(bin_name);
        if fs::rename(src, &dest).is_err() {
            fs::copy(src, &dest).map_err(|e| Error::cache_write(&dest, e))?;
            fs::remove_file(src).map_err(|e| Error::cache_write(src, e))?;
        }

        debug!(path = %dest.display(), "stored tool in cache");
        Ok(dest)
    }
}

/// Default cache root when the host provides none:
/// `~/.cache/setup-prod/tools` (or `.cache/setup-prod/tools` as a last
/// resort).
#[must_use]
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("setup-prod")
        .join("tools")
}
