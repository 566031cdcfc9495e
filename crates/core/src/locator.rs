//! Download URL construction for release artifacts.
//!
//! Assets are published as `<version>/<name>_<os>_<arch>`, with an
//! `.exe` suffix on Windows, resolved against a configured base URL.

use url::Url;

use crate::error::{Error, Result};
use crate::platform::Platform;

/// Build the download URL for a tool artifact.
///
/// The relative segment is resolved against `base` with standard URL
/// join rules, so `base` should end with a trailing slash to keep its
/// final path component. Two calls with identical inputs always return
/// the identical URL.
///
/// # Errors
///
/// Returns [`Error::InvalidBaseUrl`] when `base` is not a parseable
/// absolute URL.
pub fn download_url(base: &str, name: &str, platform: &Platform, version: &str) -> Result<Url> {
    let base = Url::parse(base).map_err(|e| Error::invalid_base_url(base, e))?;

    let mut file = format!("{}_{}_{}", name, platform.os, platform.arch);
    if platform.is_windows() {
        file.push_str(".exe");
    }
    let rel = format!("{version}/{file}");

    tracing::debug!(%rel, "artifact path");

    base.join(&rel).map_err(|e| Error::invalid_base_url(base.as_str(), e))
}
