//! cmake-release - configure, build and package CMake release archives
//!
//! A release run is a straight pipeline:
//!
//! 1. **Build**: `cmake -G Ninja` with host-derived defines, then
//!    `ninja install` (`install/strip` outside Windows)
//! 2. **Probe**: read the installed `cmake --version`
//! 3. **Package**: archive the install tree through the variant's channel
//! 4. **Studio** (zip variant only): an extra Android SDK zip when an
//!    android-cmake checkout is supplied
//!
//! Host policy lives in `convenient-cmake`, archive writing in
//! `convenient-archive`. External commands go through [`ProcessRunner`], so
//! the pipeline can be driven without real tools.

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod version;

pub use config::{ReleaseConfig, ReleaseVariant, ToolPath};
pub use error::{ReleaseError, Result};
pub use pipeline::{run_release, ReleaseOutcome};
pub use runner::{Invocation, ProcessRunner, SystemRunner};
pub use version::{parse_version_output, probe_version};
