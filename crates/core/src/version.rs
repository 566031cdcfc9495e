//! Version request resolution.

use tracing::debug;

use crate::error::Result;
use crate::source::ReleaseSource;

/// Sentinel version request meaning "whatever is newest".
pub const LATEST: &str = "latest";

/// Resolve a version request to a concrete release tag.
///
/// A non-empty request other than `latest` is returned unchanged
/// without touching the release source; that fast path needs no
/// network. Otherwise the source is asked once for the latest tag.
///
/// # Errors
///
/// Returns [`Error::VersionResolution`](crate::Error::VersionResolution)
/// when the latest-release lookup fails.
pub async fn resolve_version(
    request: &str,
    owner: &str,
    repo: &str,
    source: &dyn ReleaseSource,
) -> Result<String> {
    if !request.is_empty() && request != LATEST {
        debug!(version = request, "using requested version");
        return Ok(request.to_string());
    }

    let tag = source.latest_tag(owner, repo).await?;
    debug!(%tag, "resolved latest release");
    Ok(tag)
}
