//! GitHub Actions host integration.
//!
//! The runner communicates through files named by `GITHUB_PATH` and
//! `GITHUB_OUTPUT`: each appended line becomes a PATH entry or a step
//! output. The append logic takes explicit file paths so it is testable
//! without a runner; only the thin `register_*` wrappers read the
//! environment.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Append one line to a runner command file.
fn append_line(file: &Path, line: &str) -> io::Result<()> {
    let mut f = OpenOptions::new().create(true).append(true).open(file)?;
    writeln!(f, "{line}")
}

/// Add a directory to the job PATH via the `GITHUB_PATH` file.
///
/// Outside a runner (no `GITHUB_PATH`), the directory is only logged;
/// the caller's shell is not touched.
pub fn register_path(dir: &Path) -> io::Result<()> {
    match std::env::var_os("GITHUB_PATH") {
        Some(file) => {
            debug!(dir = %dir.display(), "adding to PATH");
            append_line(Path::new(&file), &dir.display().to_string())
        }
        None => {
            info!("add {} to your PATH", dir.display());
            Ok(())
        }
    }
}

/// Publish the `version` and `path` step outputs via `GITHUB_OUTPUT`.
///
/// No-op outside a runner.
pub fn register_outputs(version: &str, bin_path: &Path) -> io::Result<()> {
    let Some(file) = std::env::var_os("GITHUB_OUTPUT") else {
        return Ok(());
    };
    let file = Path::new(&file);
    append_line(file, &format!("version={version}"))?;
    append_line(file, &format!("path={}", bin_path.display()))
}
