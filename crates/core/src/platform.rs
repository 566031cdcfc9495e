//! Host platform identification and normalization.
//!
//! Release assets are named with Go's platform vocabulary
//! (`windows`/`darwin`/`linux`, `amd64`/`386`/`arm64`), which differs
//! from what hosts report about themselves. This module translates the
//! host identifiers into that vocabulary.
//!
//! Unknown identifiers pass through unchanged. That is deliberate: a
//! new architecture the table does not know about may still have a
//! published asset under its native name, and if it does not, the
//! failure surfaces as a download error rather than here.

/// Platform identifier combining normalized OS and architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Normalized OS name (e.g. "linux", "darwin", "windows").
    pub os: String,
    /// Normalized architecture name (e.g. "amd64", "arm64", "386").
    pub arch: String,
}

impl Platform {
    /// Build a platform from raw host identifiers, normalizing both.
    #[must_use]
    pub fn from_raw(os: &str, arch: &str) -> Self {
        Self {
            os: normalize_os(os),
            arch: normalize_arch(arch),
        }
    }

    /// Get the current host platform.
    #[must_use]
    pub fn current() -> Self {
        Self::from_raw(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Whether this platform names its executables with an `.exe` suffix
    /// and skips the explicit chmod step.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// The binary filename for a tool on this platform.
    #[must_use]
    pub fn binary_name(&self, tool: &str) -> String {
        if self.is_windows() {
            format!("{tool}.exe")
        } else {
            tool.to_string()
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Normalize a host-reported OS identifier to the release vocabulary.
///
/// Unknown values pass through unchanged.
#[must_use]
pub fn normalize_os(raw: &str) -> String {
    match raw {
        "win32" | "windows" => "windows",
        "macos" | "darwin" => "darwin",
        other => other,
    }
    .to_string()
}

/// Normalize a host-reported architecture identifier to the release
/// vocabulary.
///
/// Unknown values pass through unchanged.
#[must_use]
pub fn normalize_arch(raw: &str) -> String {
    match raw {
        "x64" | "x86_64" => "amd64",
        "x32" | "i686" | "x86" => "386",
        "aarch64" => "arm64",
        other => other,
    }
    .to_string()
}
