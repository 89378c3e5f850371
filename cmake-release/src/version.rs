//! Installed CMake version probe

use crate::error::{ReleaseError, Result};
use crate::runner::{Invocation, ProcessRunner};
use convenient_cmake::Host;
use std::path::Path;
use tracing::info;

/// Extract the bare version from `cmake --version` output
///
/// `cmake version 3.17.0-g6cb76b9` yields `3.17.0`.
pub fn parse_version_output(output: &str) -> Result<String> {
    let malformed = || ReleaseError::MalformedVersion(output.to_string());

    let first_line = output.lines().next().ok_or_else(malformed)?;
    let version_with_sha = first_line.split_whitespace().nth(2).ok_or_else(malformed)?;
    let version = version_with_sha.split('-').next().unwrap_or(version_with_sha);

    if version.is_empty() {
        return Err(malformed());
    }
    Ok(version.to_string())
}

/// Run the installed `cmake --version` and return the bare version
pub fn probe_version(host: Host, install_dir: &Path, runner: &dyn ProcessRunner) -> Result<String> {
    let cmake = install_dir.join("bin").join(host.executable("cmake"));
    if !cmake.is_file() {
        return Err(ReleaseError::MissingArtifact(cmake));
    }

    let output = runner.capture(&Invocation::new(&cmake).arg("--version"))?;
    let version = parse_version_output(&output)?;

    println!("## CMake Version = '{}'", version);
    info!("Installed CMake version {}", version);
    Ok(version)
}
