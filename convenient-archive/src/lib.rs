//! Deterministic packaging of CMake install trees
//!
//! Install trees are written through an [`ArchiveSink`] chosen by a
//! [`PackageChannel`]: a flat `.zip` or a `.tar.bz2` nested under a versioned
//! top-level directory. [`package_for_studio`] produces the extra zip the
//! Android SDK manager consumes.

pub mod channel;
pub mod error;
pub mod package;
pub mod sink;
pub mod studio;

pub use channel::PackageChannel;
pub use error::{ArchiveError, Result};
pub use package::{collect_install_files, package_install_tree, InstallFile};
pub use sink::{ArchiveSink, TarBz2Sink, ZipSink};
pub use studio::{
    find_module_dir, package_for_studio, source_properties, StudioBundle, SOURCE_PROPERTIES,
    STUDIO_MODULES, STUDIO_SUFFIX,
};
