//! setup-prod library.
//!
//! A GitHub Action that resolves a release of the `prod` binary,
//! downloads it once per version into the runner tool cache, and adds
//! it to the job PATH. The binary in `main.rs` is a thin wrapper over
//! these modules.

pub mod cli;
pub mod host;
pub mod installer;

pub use installer::{InstallConfig, Installed, Installer};
