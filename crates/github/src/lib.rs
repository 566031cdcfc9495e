//! GitHub backends for setup-prod.
//!
//! Concrete implementations of the core collaborator traits: the
//! `releases/latest` lookup behind
//! [`ReleaseSource`](setup_prod_core::ReleaseSource) and the asset
//! download behind
//! [`ArtifactTransport`](setup_prod_core::ArtifactTransport). Both
//! accept an optional bearer token; unauthenticated use works for
//! public repositories within API rate limits.

mod release;
mod transport;

pub use release::{GITHUB_API, GitHubReleases};
pub use transport::HttpTransport;
