//! End-to-end release pipeline: build, probe, package

use crate::builder::build_cmake;
use crate::config::ReleaseConfig;
use crate::error::Result;
use crate::runner::ProcessRunner;
use crate::version::probe_version;
use convenient_archive::{package_for_studio, package_install_tree, PackageChannel, StudioBundle};
use convenient_cmake::Host;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub install_dir: PathBuf,
    pub version: String,
    pub package_name: String,

    /// Archives written, base package first
    pub packages: Vec<PathBuf>,
}

fn packaging_banner(title: &str, package: &Path, install_dir: &Path) {
    println!("## {} ##", title);
    println!("## Package     : {}", package.display());
    println!("## Install Dir : {}", install_dir.display());
    let _ = io::stdout().flush();
}

/// Run the whole release for `host`
///
/// The first failing step aborts the run; nothing written so far is removed.
pub fn run_release(
    host: Host,
    config: &ReleaseConfig,
    runner: &dyn ProcessRunner,
) -> Result<ReleaseOutcome> {
    let install_dir = build_cmake(host, config, runner)?;
    let version = probe_version(host, &install_dir, runner)?;
    let package_name = config.package_name(host, &version);

    let channel = config.variant.channel;
    packaging_banner(
        "Packaging",
        &channel.archive_path(&config.dest_dir, &package_name),
        &install_dir,
    );
    let package = package_install_tree(&install_dir, &package_name, &config.dest_dir, channel)?;
    let mut packages = vec![package];

    match (&config.android_cmake, config.variant.studio) {
        (Some(android_cmake), true) => {
            let studio_name = format!("{}{}", package_name, convenient_archive::STUDIO_SUFFIX);
            packaging_banner(
                "Packaging with Ninja",
                &PackageChannel::FlatZip.archive_path(&config.dest_dir, &studio_name),
                &install_dir,
            );

            let bundle = StudioBundle {
                version: version.clone(),
                accelerator: config.ninja.path.clone(),
                modules_dir: android_cmake.clone(),
            };
            packages.push(package_for_studio(
                &install_dir,
                &package_name,
                &config.dest_dir,
                &bundle,
            )?);
        }
        (None, true) => info!("No android-cmake checkout given, skipping Android Studio package"),
        (_, false) => {}
    }

    info!("Release {} complete", package_name);
    Ok(ReleaseOutcome {
        install_dir,
        version,
        package_name,
        packages,
    })
}
