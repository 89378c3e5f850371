//! Packaging channels
//!
//! A channel decides the archive format and how install-tree paths are laid
//! out inside it. The zip channel is flat so it can be unpacked straight into
//! an existing tool directory; the tarball channel nests everything under a
//! versioned top-level directory.

use crate::error::Result;
use crate::sink::{ArchiveSink, TarBz2Sink, ZipSink};
use std::fmt;
use std::path::{Path, PathBuf};

/// Archive kind plus path layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageChannel {
    /// `.zip`, entries relative to the install root
    FlatZip,

    /// `.tar.bz2`, entries under `<package-name>/`
    VersionedTarBz2,
}

impl PackageChannel {
    /// File extension including the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            Self::FlatZip => ".zip",
            Self::VersionedTarBz2 => ".tar.bz2",
        }
    }

    /// Where the archive for `package_name` lands inside `dest_dir`
    pub fn archive_path(self, dest_dir: &Path, package_name: &str) -> PathBuf {
        dest_dir.join(format!("{}{}", package_name, self.extension()))
    }

    /// Archive path of an install-tree entry
    pub fn entry_name(self, package_name: &str, relative: &str) -> String {
        match self {
            Self::FlatZip => relative.to_string(),
            Self::VersionedTarBz2 => format!("{}/{}", package_name, relative),
        }
    }

    /// Open a fresh archive of this channel's kind at `path`
    pub fn create_sink(self, path: &Path) -> Result<Box<dyn ArchiveSink>> {
        Ok(match self {
            Self::FlatZip => Box::new(ZipSink::create(path)?),
            Self::VersionedTarBz2 => Box::new(TarBz2Sink::create(path)?),
        })
    }
}

impl fmt::Display for PackageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlatZip => write!(f, "zip"),
            Self::VersionedTarBz2 => write!(f, "tar.bz2"),
        }
    }
}
