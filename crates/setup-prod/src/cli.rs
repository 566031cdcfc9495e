//! Command-line and GitHub Actions input surface.
//!
//! Inputs double as flags and `INPUT_*` environment variables, which is
//! how the Actions runner passes `with:` values to a binary.

use clap::Parser;
use std::path::PathBuf;

/// The tool this installer deploys. Fixed by design; the action exists
/// for exactly one binary.
pub const TOOL: &str = "prod";

/// Repository owner the releases are published under.
pub const OWNER: &str = "sysprod";

/// Default artifact root when no `base_url` input is given.
pub const DEFAULT_BASE_URL: &str = "https://github.com/sysprod/prod/releases/download/";

/// Install the prod binary into the tool cache and add it to PATH.
///
/// No auto `--version` print flag: that name belongs to the version
/// request input.
#[derive(Debug, Parser)]
#[command(name = "setup-prod", about)]
pub struct Cli {
    /// Release tag to install, or "latest"
    #[arg(long, env = "INPUT_VERSION", default_value = "latest")]
    pub version: String,

    /// Artifact root the download URL is resolved against
    #[arg(long, env = "INPUT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// GitHub token for private releases and API rate limits
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Tool cache root; the runner provides this on hosted runners
    #[arg(long, env = "RUNNER_TOOL_CACHE")]
    pub tool_cache: Option<PathBuf>,

    /// Re-download even when the version is already cached
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Effective token: the explicit input, else the ambient
    /// `GITHUB_TOKEN` the runner exports. Empty strings count as unset,
    /// which is how the runner materializes an absent `token:` input,
    /// so an empty explicit token still falls through to the ambient
    /// one.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.is_empty())
    }

    /// Effective cache root.
    #[must_use]
    pub fn cache_root(&self) -> PathBuf {
        self.tool_cache
            .clone()
            .unwrap_or_else(setup_prod_core::default_cache_root)
    }
}
