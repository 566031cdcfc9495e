//! setup-prod CLI entry point.

// The binary reports failures on stderr before exiting.
#![allow(clippy::print_stderr)]

use clap::Parser;
use miette::IntoDiagnostic;
use std::sync::Arc;
use tracing::info;

use setup_prod::cli::{Cli, OWNER, TOOL};
use setup_prod::{InstallConfig, Installer, host};
use setup_prod_core::{Platform, ToolCache};
use setup_prod_github::{GitHubReleases, HttpTransport};

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Tracing may be unusable during a panic, so the hook writes
    // directly to stderr.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("setup-prod panicked: {panic_info}");
        eprintln!("run with RUST_LOG=debug for more information");
    }));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let token = cli.token();

    let config = InstallConfig {
        tool: TOOL.to_string(),
        owner: OWNER.to_string(),
        base_url: cli.base_url.clone(),
        version: cli.version.clone(),
        force: cli.force,
    };

    let installer = Installer::new(
        config,
        ToolCache::new(cli.cache_root()),
        Arc::new(GitHubReleases::new().with_token(token.clone())),
        Arc::new(HttpTransport::new().with_token(token)),
    );

    let platform = Platform::current();
    let installed = installer.run(&platform).await?;

    host::register_path(&installed.bin_dir).into_diagnostic()?;
    host::register_outputs(&installed.version, &installed.bin_path).into_diagnostic()?;

    info!(
        version = %installed.version,
        platform = %installed.platform,
        path = %installed.bin_path.display(),
        "setup complete"
    );

    Ok(())
}
