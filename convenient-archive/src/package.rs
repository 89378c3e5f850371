//! Install-tree packaging

use crate::channel::PackageChannel;
use crate::error::{ArchiveError, Result};
use crate::sink::ArchiveSink;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// A regular file inside an install tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallFile {
    /// Location on disk
    pub path: PathBuf,

    /// `/`-separated path relative to the install root
    pub relative: String,
}

/// Collect every regular file under `install_dir`, sorted by path
///
/// Symlinks to files are included (their targets get archived); symlinked
/// directories are not descended into.
pub fn collect_install_files(install_dir: &Path) -> Result<Vec<InstallFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(install_dir).sort_by_file_name() {
        let entry = entry?;
        let file_type = entry.file_type();
        let is_file =
            file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let relative = relative_name(install_dir, entry.path())?;
        files.push(InstallFile {
            path: entry.into_path(),
            relative,
        });
    }

    Ok(files)
}

/// `/`-joined path of `path` relative to `root`
pub fn relative_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ArchiveError::InvalidPath(path.to_path_buf()))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .ok_or_else(|| ArchiveError::InvalidPath(path.to_path_buf()))?,
            ),
            _ => return Err(ArchiveError::InvalidPath(path.to_path_buf())),
        }
    }

    if parts.is_empty() {
        return Err(ArchiveError::InvalidPath(path.to_path_buf()));
    }
    Ok(parts.join("/"))
}

/// Write the install tree into `sink`, skipping entries named in `skip`
///
/// Returns the number of files written.
pub fn append_install_tree(
    sink: &mut dyn ArchiveSink,
    install_dir: &Path,
    channel: PackageChannel,
    package_name: &str,
    skip: &HashSet<String>,
) -> Result<usize> {
    let mut written = 0;
    for file in collect_install_files(install_dir)? {
        let name = channel.entry_name(package_name, &file.relative);
        if skip.contains(&name) {
            debug!("Skipping {} (replaced by bundled file)", name);
            continue;
        }
        sink.append_file(&file.path, &name)?;
        written += 1;
    }
    Ok(written)
}

/// Package `install_dir` as `<dest_dir>/<package_name><ext>`
///
/// The install tree is only read. Returns the archive path.
pub fn package_install_tree(
    install_dir: &Path,
    package_name: &str,
    dest_dir: &Path,
    channel: PackageChannel,
) -> Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;
    let package_path = channel.archive_path(dest_dir, package_name);

    info!(
        "Packaging {} as {} into {}",
        install_dir.display(),
        channel,
        package_path.display()
    );

    let mut sink = channel.create_sink(&package_path)?;
    let count = append_install_tree(
        sink.as_mut(),
        install_dir,
        channel,
        package_name,
        &HashSet::new(),
    )?;
    sink.finish()?;

    info!("Wrote {} files to {}", count, package_path.display());
    Ok(package_path)
}
