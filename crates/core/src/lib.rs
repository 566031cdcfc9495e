//! Core types for setup-prod.
//!
//! This crate carries everything the installer orchestration needs that
//! is independent of any concrete backend: the error taxonomy, host
//! platform normalization, download-URL construction, the local tool
//! cache, and the traits the remote collaborators implement.

pub mod cache;
pub mod error;
pub mod locator;
pub mod platform;
pub mod source;
pub mod version;

pub use cache::{ToolCache, default_cache_root};
pub use error::{Error, Result};
pub use locator::download_url;
pub use platform::Platform;
pub use source::{ArtifactTransport, ReleaseSource};
pub use version::{LATEST, resolve_version};
