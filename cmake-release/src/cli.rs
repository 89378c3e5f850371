//! Command-line surface shared by the release binaries

use crate::config::{absolute, ReleaseConfig, ReleaseVariant, ToolPath};
use crate::error::Result;
use crate::pipeline::{run_release, ReleaseOutcome};
use crate::runner::SystemRunner;
use clap::{Args, Parser};
use convenient_cmake::Host;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_TARGETS: [&str; 3] = ["cmake_release", "convenient_cmake", "convenient_archive"];

/// Arguments common to every release binary
#[derive(Args, Debug, Clone)]
pub struct ReleaseArgs {
    /// CMake source checkout
    pub src: PathBuf,

    /// Directory for the build/ and install/ trees
    pub out_dir: PathBuf,

    /// Directory that receives the packages
    pub dest_dir: PathBuf,

    /// Build identifier appended to package names
    pub build_id: String,

    /// Path to the cmake used for configuring (default: found on PATH)
    #[arg(long, env = "RELEASE_CMAKE")]
    pub cmake: Option<PathBuf>,

    /// Path to the ninja used for building (default: found on PATH)
    #[arg(long, env = "RELEASE_NINJA")]
    pub ninja: Option<PathBuf>,

    /// Repository of clang-r* toolchains to compile with
    #[arg(long, env = "RELEASE_CLANG_REPO")]
    pub clang_repo: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Zip release with optional Android Studio package
#[derive(Parser, Debug)]
#[command(name = "cmake-release")]
#[command(about = "Build CMake and package it as a zip (plus an Android Studio SDK zip)")]
#[command(version)]
pub struct StudioCli {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// android-cmake checkout providing the NDK helper modules
    #[arg(long, env = "RELEASE_ANDROID_CMAKE")]
    pub android_cmake: Option<PathBuf>,
}

/// Tarball release
#[derive(Parser, Debug)]
#[command(name = "cmake-release-tarball")]
#[command(about = "Build CMake and package it as a versioned tar.bz2")]
#[command(version)]
pub struct TarballCli {
    #[command(flatten)]
    pub release: ReleaseArgs,
}

impl ReleaseArgs {
    /// Resolve paths and tools into a [`ReleaseConfig`]
    pub fn into_config(
        self,
        variant: ReleaseVariant,
        android_cmake: Option<PathBuf>,
    ) -> Result<ReleaseConfig> {
        let android_cmake = match android_cmake {
            Some(path) => Some(absolute(&path)?),
            None => None,
        };
        let clang_repo = match self.clang_repo {
            Some(path) => Some(absolute(&path)?),
            None => None,
        };

        Ok(ReleaseConfig {
            src: absolute(&self.src)?,
            out_dir: absolute(&self.out_dir)?,
            dest_dir: absolute(&self.dest_dir)?,
            build_id: self.build_id,
            cmake: ToolPath::locate(self.cmake, "cmake")?,
            ninja: ToolPath::locate(self.ninja, "ninja")?,
            clang_repo,
            android_cmake,
            variant,
        })
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins; otherwise the release crates log at info, or debug with
/// `--verbose`.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Run a release on the current host with real processes
pub fn run(
    args: ReleaseArgs,
    android_cmake: Option<PathBuf>,
    variant: ReleaseVariant,
) -> Result<ReleaseOutcome> {
    let host = Host::current()?;
    let config = args.into_config(variant, android_cmake)?;
    run_release(host, &config, &SystemRunner)
}

/// Print the produced packages
pub fn report(outcome: &ReleaseOutcome) {
    println!();
    println!("## Done: {} ##", outcome.package_name);
    for package in &outcome.packages {
        println!("##   {}", package.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definitions_are_valid() {
        StudioCli::command().debug_assert();
        TarballCli::command().debug_assert();
    }

    #[test]
    fn test_parse_studio_options() {
        let cli = StudioCli::try_parse_from([
            "cmake-release",
            "src",
            "out",
            "dist",
            "1234",
            "--ninja",
            "/prebuilts/ninja",
            "--clang-repo",
            "/prebuilts/clang",
            "--android-cmake",
            "/external/android-cmake",
        ])
        .unwrap();

        assert_eq!(cli.release.src, PathBuf::from("src"));
        assert_eq!(cli.release.build_id, "1234");
        assert_eq!(cli.release.ninja, Some(PathBuf::from("/prebuilts/ninja")));
        assert_eq!(cli.release.clang_repo, Some(PathBuf::from("/prebuilts/clang")));
        assert_eq!(cli.android_cmake, Some(PathBuf::from("/external/android-cmake")));
        assert!(!cli.release.verbose);
    }

    #[test]
    fn test_tarball_rejects_android_cmake() {
        let result = TarballCli::try_parse_from([
            "cmake-release-tarball",
            "src",
            "out",
            "dist",
            "1234",
            "--android-cmake",
            "/external/android-cmake",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_positional_is_rejected() {
        assert!(StudioCli::try_parse_from(["cmake-release", "src", "out", "dist"]).is_err());
    }

    #[test]
    fn test_into_config_makes_paths_absolute() {
        let cli = TarballCli::try_parse_from([
            "cmake-release-tarball",
            "src",
            "out",
            "dist",
            "42",
            "--cmake",
            "/opt/cmake/bin/cmake",
            "--ninja",
            "/opt/ninja/ninja",
        ])
        .unwrap();

        let config = cli.release.into_config(ReleaseVariant::TARBALL, None).unwrap();

        assert!(config.src.is_absolute() && config.src.ends_with("src"));
        assert!(config.out_dir.is_absolute());
        assert!(config.dest_dir.is_absolute());
        assert_eq!(config.cmake, ToolPath::at("/opt/cmake/bin/cmake"));
        assert_eq!(config.ninja, ToolPath::at("/opt/ninja/ninja"));
        assert_eq!(config.variant, ReleaseVariant::TARBALL);
        assert!(config.android_cmake.is_none());
    }
}
