//! Android Studio SDK packaging
//!
//! The SDK manager expects a flat zip that, next to the CMake install tree,
//! carries a `source.properties` descriptor, the `ninja` binary under `bin/`
//! and two NDK helper modules under `share/cmake-<x.y>/Modules/`.

use crate::channel::PackageChannel;
use crate::error::{ArchiveError, Result};
use crate::package::append_install_tree;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the SDK descriptor entry
pub const SOURCE_PROPERTIES: &str = "source.properties";

/// Helper modules copied from the android-cmake checkout
pub const STUDIO_MODULES: [&str; 2] = ["AndroidNdkModules.cmake", "AndroidNdkGdb.cmake"];

/// Appended to the package name of the studio archive
pub const STUDIO_SUFFIX: &str = "-for-studio";

/// Extra inputs of the studio archive
#[derive(Debug, Clone)]
pub struct StudioBundle {
    /// Bare CMake version, e.g. `3.18.1`
    pub version: String,

    /// Build accelerator binary to ship in `bin/`
    pub accelerator: PathBuf,

    /// Directory holding the [`STUDIO_MODULES`]
    pub modules_dir: PathBuf,
}

/// Render the SDK descriptor for `version`
pub fn source_properties(version: &str) -> String {
    format!(
        "Pkg.Revision = {version}\n\
         Pkg.Path = cmake;{version}\n\
         Pkg.Desc = CMake {version}\n"
    )
}

/// Name of the single `share/cmake-*` directory of an install tree
pub fn find_module_dir(install_dir: &Path) -> Result<String> {
    let share = install_dir.join("share");
    let pattern = format!(
        "{}/cmake-*",
        glob::Pattern::escape(&share.to_string_lossy())
    );

    let mut matches = Vec::new();
    for path in glob::glob(&pattern)? {
        let path = path?;
        if path.is_dir() {
            matches.push(path);
        }
    }

    match matches.as_slice() {
        [only] => only
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| ArchiveError::InvalidPath(only.clone())),
        _ => Err(ArchiveError::ModuleDirectory {
            pattern,
            matches: matches.len(),
        }),
    }
}

fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ArchiveError::MissingArtifact(path.to_path_buf()))
    }
}

fn file_name_str(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ArchiveError::InvalidPath(path.to_path_buf()))
}

/// Write `<dest_dir>/<package_name>-for-studio.zip`
///
/// Every bundled input is checked before the archive is created. Bundled
/// files replace install-tree entries of the same name.
pub fn package_for_studio(
    install_dir: &Path,
    package_name: &str,
    dest_dir: &Path,
    bundle: &StudioBundle,
) -> Result<PathBuf> {
    let module_dir = find_module_dir(install_dir)?;
    debug!("Module directory: share/{}", module_dir);

    require_file(&bundle.accelerator)?;
    let mut extras = vec![(
        bundle.accelerator.clone(),
        format!("bin/{}", file_name_str(&bundle.accelerator)?),
    )];
    for module in STUDIO_MODULES {
        let path = bundle.modules_dir.join(module);
        require_file(&path)?;
        extras.push((path, format!("share/{}/Modules/{}", module_dir, module)));
    }

    fs::create_dir_all(dest_dir)?;
    let channel = PackageChannel::FlatZip;
    let studio_name = format!("{}{}", package_name, STUDIO_SUFFIX);
    let package_path = channel.archive_path(dest_dir, &studio_name);

    info!(
        "Packaging {} for Android Studio into {}",
        install_dir.display(),
        package_path.display()
    );

    let mut skip: HashSet<String> = extras.iter().map(|(_, name)| name.clone()).collect();
    skip.insert(SOURCE_PROPERTIES.to_string());

    let mut sink = channel.create_sink(&package_path)?;
    let count = append_install_tree(sink.as_mut(), install_dir, channel, &studio_name, &skip)?;
    sink.append_text(SOURCE_PROPERTIES, &source_properties(&bundle.version))?;
    for (path, name) in &extras {
        sink.append_file(path, name)?;
    }
    sink.finish()?;

    info!(
        "Wrote {} files plus {} bundled entries to {}",
        count,
        extras.len() + 1,
        package_path.display()
    );
    Ok(package_path)
}
