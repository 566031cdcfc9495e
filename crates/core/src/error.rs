//! Error types for the setup-prod core.
//!
//! Every failure class here is terminal for the current run: the
//! installer reports the first error it hits and performs no further
//! steps. Nothing is retried.

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Error type for install operations.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The configured artifact root is not a parseable absolute URL.
    #[error("invalid base URL: {url}")]
    #[diagnostic(
        code(setup_prod::invalid_base_url),
        help("base_url must be an absolute URL, e.g. https://github.com/sysprod/prod/releases/download/")
    )]
    InvalidBaseUrl {
        /// The offending base URL string
        url: String,
        /// Parse failure, when the URL library produced one
        #[source]
        source: Option<url::ParseError>,
    },

    /// The remote release lookup failed or returned no usable tag.
    #[error("version resolution failed: {message}")]
    #[diagnostic(
        code(setup_prod::version_resolution),
        help("Check network access and, for private repositories, the token input")
    )]
    VersionResolution {
        /// Description of the lookup failure
        message: String,
    },

    /// The artifact transport failed, including not-found responses.
    #[error("download failed: {message}")]
    #[diagnostic(
        code(setup_prod::download),
        help("Verify that a release asset exists for this version, platform and architecture")
    )]
    Download {
        /// Description of the transport failure
        message: String,
    },

    /// The downloaded binary could not be marked executable.
    #[error("could not mark {} executable", path.display())]
    #[diagnostic(code(setup_prod::permission))]
    Permission {
        /// Path of the binary that could not be chmodded
        path: Box<Path>,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The local tool cache could not be written.
    #[error("cache write failed{}", path.as_ref().map_or(String::new(), |p| format!(": {}", p.display())))]
    #[diagnostic(
        code(setup_prod::cache_write),
        help("Check free disk space and permissions on the tool cache directory")
    )]
    CacheWrite {
        /// Path that caused the error, if available
        path: Option<Box<Path>>,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid-base-URL error from a parse failure.
    #[must_use]
    pub fn invalid_base_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            source: Some(source),
        }
    }

    /// Create a version-resolution error.
    #[must_use]
    pub fn version_resolution(msg: impl Into<String>) -> Self {
        Self::VersionResolution {
            message: msg.into(),
        }
    }

    /// Create a download error.
    #[must_use]
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download {
            message: msg.into(),
        }
    }

    /// Create a permission error for the given binary path.
    #[must_use]
    pub fn permission(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Permission {
            path: path.as_ref().into(),
            source,
        }
    }

    /// Create a cache-write error with path context.
    #[must_use]
    pub fn cache_write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::CacheWrite {
            path: Some(path.as_ref().into()),
            source,
        }
    }

    /// Create a cache-write error without path context.
    #[must_use]
    pub fn cache_write_no_path(source: std::io::Error) -> Self {
        Self::CacheWrite { path: None, source }
    }
}

/// Result type for install operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_resolution_message() {
        let err = Error::version_resolution("no releases found");
        assert_eq!(
            err.to_string(),
            "version resolution failed: no releases found"
        );
    }

    #[test]
    fn test_download_message() {
        let err = Error::download("HTTP 404");
        assert_eq!(err.to_string(), "download failed: HTTP 404");
    }

    #[test]
    fn test_cache_write_with_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::cache_write("/opt/cache/prod", io);
        assert!(err.to_string().contains("/opt/cache/prod"));
    }

    #[test]
    fn test_cache_write_without_path() {
        let io = std::io::Error::other("disk full");
        let err = Error::cache_write_no_path(io);
        assert_eq!(err.to_string(), "cache write failed");
    }

    #[test]
    fn test_invalid_base_url_keeps_input() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err = Error::invalid_base_url("not a url", parse_err);
        assert!(err.to_string().contains("not a url"));
    }
}
