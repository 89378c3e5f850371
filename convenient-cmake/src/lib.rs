//! Host policy and configure-define derivation for CMake release builds
//!
//! - [`Host`] classifies the running platform and owns the per-host
//!   [`HostPolicy`] table.
//! - [`ToolchainFlags`] derives compiler and linker flags from that table.
//! - [`ToolchainSelection`] picks the newest clang snapshot from a repository.
//! - [`cmake_defines`] assembles the ordered [`ConfigurationMap`] passed to
//!   `cmake` as `-D` overrides.
//!
//! # Example
//!
//! ```
//! use convenient_cmake::{cmake_defines, DefineInputs, Host};
//!
//! let defines = cmake_defines(Host::Linux, &DefineInputs::default()).unwrap();
//! assert_eq!(defines.get("CMAKE_BUILD_TYPE"), Some("Release"));
//! assert_eq!(defines.get("OPENSSL_USE_STATIC_LIBS"), Some("ON"));
//! ```

pub mod defines;
pub mod error;
pub mod flags;
pub mod host;
pub mod toolchain;

pub use defines::{cmake_defines, ConfigurationMap, DefineInputs};
pub use error::{CmakeError, Result};
pub use flags::ToolchainFlags;
pub use host::{Host, HostPolicy};
pub use toolchain::{
    find_latest_toolchain, normalize_cmake_path, ToolchainPolicy, ToolchainSelection,
    TOOLCHAIN_PREFIX,
};
