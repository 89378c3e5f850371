//! Compiler toolchain selection from a clang repository
//!
//! A clang repository holds several prebuilt snapshots side by side
//! (`clang-r365631`, `clang-r383902b`, ...). The newest one is picked by plain
//! string comparison of the directory names.

use crate::error::{CmakeError, Result};
use crate::host::Host;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory-name prefix of a toolchain snapshot
pub const TOOLCHAIN_PREFIX: &str = "clang-r";

/// How a supplied clang repository is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolchainPolicy {
    /// The repository must exist and contain a snapshot
    #[default]
    Strict,

    /// A repository path that does not exist is skipped
    Permissive,
}

/// C and C++ compilers picked from a toolchain snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainSelection {
    /// Snapshot directory the compilers come from
    pub root: PathBuf,
    pub c_compiler: String,
    pub cxx_compiler: String,
}

impl ToolchainSelection {
    /// Select the newest snapshot in `repo` and derive compiler paths for `host`
    ///
    /// Returns `Ok(None)` only under [`ToolchainPolicy::Permissive`] when the
    /// repository does not exist.
    pub fn resolve(host: Host, repo: &Path, policy: ToolchainPolicy) -> Result<Option<Self>> {
        if policy == ToolchainPolicy::Permissive && !repo.exists() {
            warn!("Clang repository {} does not exist, using default compilers", repo.display());
            return Ok(None);
        }

        let root = find_latest_toolchain(repo)?;
        let root = std::path::absolute(&root).map_err(|source| CmakeError::Io {
            path: root.clone(),
            source,
        })?;

        let policy = host.policy();
        let bin = root.join("bin");
        let selection = Self {
            c_compiler: normalize_cmake_path(&bin.join(policy.c_compiler).to_string_lossy()),
            cxx_compiler: normalize_cmake_path(&bin.join(policy.cxx_compiler).to_string_lossy()),
            root,
        };

        info!("Using toolchain {}", selection.root.display());
        Ok(Some(selection))
    }
}

/// Find the lexicographically greatest `clang-r*` directory in `repo`
pub fn find_latest_toolchain(repo: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(repo).map_err(|source| CmakeError::Io {
        path: repo.to_path_buf(),
        source,
    })?;

    let mut latest: Option<String> = None;
    for entry in entries {
        let entry = entry.map_err(|source| CmakeError::Io {
            path: repo.to_path_buf(),
            source,
        })?;

        // Follows symlinks, matching a plain isdir() check
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(TOOLCHAIN_PREFIX) {
            continue;
        }

        debug!("Toolchain candidate: {}", name);
        if latest.as_ref().is_none_or(|current| name > *current) {
            latest = Some(name);
        }
    }

    latest
        .map(|name| repo.join(name))
        .ok_or_else(|| CmakeError::ToolchainNotFound(repo.to_path_buf()))
}

/// Convert path separators to the forward slashes CMake expects
pub fn normalize_cmake_path(path: &str) -> String {
    path.replace('\\', "/")
}
