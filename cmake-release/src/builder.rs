//! Configure and build CMake with Ninja

use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result};
use crate::runner::{Invocation, ProcessRunner};
use convenient_cmake::defines::{INSTALL_PREFIX, MAKE_PROGRAM};
use convenient_cmake::{cmake_defines, ConfigurationMap, Host};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Generator passed to `cmake -G`
pub const GENERATOR: &str = "Ninja";

/// Full define map for a release build: derived defines plus install prefix
/// and, when the accelerator was given or found on `PATH`, the make program
pub fn release_defines(host: Host, config: &ReleaseConfig) -> Result<ConfigurationMap> {
    let mut defines = cmake_defines(host, &config.define_inputs())?;
    defines.insert(INSTALL_PREFIX, config.install_dir().to_string_lossy());
    if config.ninja.is_known() {
        defines.insert(MAKE_PROGRAM, config.ninja.path.to_string_lossy());
    }
    Ok(defines)
}

/// `cmake -G Ninja <src> -D...`, run from the build directory
pub fn configure_invocation(config: &ReleaseConfig, defines: &ConfigurationMap) -> Invocation {
    Invocation::new(&config.cmake.path)
        .arg("-G")
        .arg(GENERATOR)
        .arg(config.src.to_string_lossy())
        .args(defines.define_args())
        .current_dir(config.build_dir())
}

/// `ninja install` on Windows, `ninja install/strip` elsewhere
pub fn install_invocation(host: Host, config: &ReleaseConfig) -> Invocation {
    Invocation::new(&config.ninja.path)
        .arg(host.policy().install_target)
        .current_dir(config.build_dir())
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Configure, build and install; returns the install directory
///
/// Partially written build and install directories are left in place when a
/// step fails.
pub fn build_cmake(host: Host, config: &ReleaseConfig, runner: &dyn ProcessRunner) -> Result<PathBuf> {
    let build_dir = config.build_dir();
    let install_dir = config.install_dir();

    println!("## Building ##");
    println!("## Out Dir     : {}", config.out_dir.display());
    println!("## Src         : {}", config.src.display());
    let _ = io::stdout().flush();

    create_dir(&build_dir)?;
    create_dir(&install_dir)?;

    let defines = release_defines(host, config)?;
    for (key, value) in defines.iter() {
        debug!("  {} = {}", key, value);
    }

    info!("Configuring {} for {}", config.src.display(), host);
    runner.run(&configure_invocation(config, &defines))?;

    info!("Building target {}", host.policy().install_target);
    runner.run(&install_invocation(host, config))?;

    Ok(install_dir)
}
