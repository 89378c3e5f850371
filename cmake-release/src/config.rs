//! Resolved release configuration
//!
//! Command-line input is turned into one [`ReleaseConfig`] up front: paths are
//! made absolute and tools are located on `PATH`. Later stages only read this
//! value and never consult the process environment.

use crate::error::{ReleaseError, Result};
use convenient_archive::PackageChannel;
use convenient_cmake::{DefineInputs, Host, ToolchainPolicy};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Packaging policy of a release binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseVariant {
    pub channel: PackageChannel,
    pub toolchain_policy: ToolchainPolicy,

    /// Whether the Android Studio archive can be produced
    pub studio: bool,
}

impl ReleaseVariant {
    /// Flat zip plus the Android Studio archive
    pub const STUDIO: Self = Self {
        channel: PackageChannel::FlatZip,
        toolchain_policy: ToolchainPolicy::Strict,
        studio: true,
    };

    /// Versioned `.tar.bz2`, tolerant of a missing clang repository
    pub const TARBALL: Self = Self {
        channel: PackageChannel::VersionedTarBz2,
        toolchain_policy: ToolchainPolicy::Permissive,
        studio: false,
    };
}

/// Location of an external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPath {
    pub path: PathBuf,

    /// Given by the caller rather than defaulted
    pub explicit: bool,

    /// False when only the bare program name is known
    pub resolved: bool,
}

impl ToolPath {
    /// A tool at a known location
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            explicit: true,
            resolved: true,
        }
    }

    /// Whether the location is worth handing to other tools
    ///
    /// True for caller-supplied paths even when they are bare names missing
    /// from `PATH`.
    pub fn is_known(&self) -> bool {
        self.explicit || self.resolved
    }

    /// Locate `explicit`, or `default_name` on `PATH` when not given
    ///
    /// Paths with a directory part are made absolute. Bare names are looked
    /// up on `PATH`; if that fails the name is kept and left to the OS.
    pub fn locate(explicit: Option<PathBuf>, default_name: &str) -> Result<Self> {
        let is_explicit = explicit.is_some();
        let candidate = explicit.unwrap_or_else(|| PathBuf::from(default_name));

        if candidate.components().count() > 1 {
            return Ok(Self::at(absolute(&candidate)?));
        }

        match which::which(&candidate) {
            Ok(found) => {
                debug!("Found {} at {}", candidate.display(), found.display());
                Ok(Self {
                    path: found,
                    explicit: is_explicit,
                    resolved: true,
                })
            }
            Err(e) => {
                warn!("{} not found on PATH ({}), using bare name", candidate.display(), e);
                Ok(Self {
                    path: candidate,
                    explicit: is_explicit,
                    resolved: false,
                })
            }
        }
    }
}

/// Everything a release run needs
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// CMake source checkout
    pub src: PathBuf,

    /// Holds `build/` and `install/`
    pub out_dir: PathBuf,

    /// Receives the archives
    pub dest_dir: PathBuf,

    pub build_id: String,
    pub cmake: ToolPath,
    pub ninja: ToolPath,
    pub clang_repo: Option<PathBuf>,

    /// android-cmake checkout with the NDK helper modules
    pub android_cmake: Option<PathBuf>,

    pub variant: ReleaseVariant,
}

impl ReleaseConfig {
    pub fn build_dir(&self) -> PathBuf {
        self.out_dir.join("build")
    }

    pub fn install_dir(&self) -> PathBuf {
        self.out_dir.join("install")
    }

    pub fn define_inputs(&self) -> DefineInputs {
        DefineInputs {
            clang_repo: self.clang_repo.clone(),
            toolchain_policy: self.variant.toolchain_policy,
        }
    }

    /// `cmake-<host>-<version>-<build id>`
    pub fn package_name(&self, host: Host, version: &str) -> String {
        format!("cmake-{}-{}-{}", host, version, self.build_id)
    }
}

/// Absolute form of `path` without touching the filesystem
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}
