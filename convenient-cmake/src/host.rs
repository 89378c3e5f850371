//! Host platform resolution and the per-host policy table
//!
//! Every host-conditional decision of a release build lives in [`HostPolicy`]:
//! compiler and linker flags, extra configure defines, the install target and
//! the compiler driver names. Callers look the record up once through
//! [`Host::policy`] instead of branching on the host themselves.

use crate::error::{CmakeError, Result};
use std::fmt;

/// Supported packaging hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    Darwin,
    Linux,
    Windows,
}

/// Host-specific build policy
#[derive(Debug, PartialEq, Eq)]
pub struct HostPolicy {
    /// Flags for the ASM, C and C++ compilers
    pub cflags: &'static [&'static str],

    /// Flags for executable, shared and module links
    pub ldflags: &'static [&'static str],

    /// Extra configure defines appended after the flag keys
    pub defines: &'static [(&'static str, &'static str)],

    /// Ninja target that installs the build
    pub install_target: &'static str,

    /// C compiler driver inside a toolchain's `bin/`
    pub c_compiler: &'static str,

    /// C++ compiler driver inside a toolchain's `bin/`
    pub cxx_compiler: &'static str,

    /// Suffix of executables produced for this host
    pub exe_suffix: &'static str,
}

static DARWIN: HostPolicy = HostPolicy {
    cflags: &[],
    ldflags: &[],
    // Feeds -mmacosx-version-min and lets CMake pick the SDK.
    // Set CMAKE_OSX_SYSROOT or SDKROOT to force a specific SDK.
    defines: &[("CMAKE_OSX_DEPLOYMENT_TARGET", "10.9")],
    install_target: "install/strip",
    c_compiler: "clang",
    cxx_compiler: "clang++",
    exe_suffix: "",
};

static LINUX: HostPolicy = HostPolicy {
    cflags: &[],
    ldflags: &[
        "-static-libstdc++",
        "-static-libgcc",
        "-lpthread",
        "-fuse-ld=lld",
    ],
    defines: &[("OPENSSL_USE_STATIC_LIBS", "ON")],
    install_target: "install/strip",
    c_compiler: "clang",
    cxx_compiler: "clang++",
    exe_suffix: "",
};

static WINDOWS: HostPolicy = HostPolicy {
    cflags: &["/EHsc"],
    ldflags: &[],
    defines: &[],
    install_target: "install",
    c_compiler: "clang-cl.exe",
    cxx_compiler: "clang-cl.exe",
    exe_suffix: ".exe",
};

impl Host {
    /// All supported hosts
    pub const ALL: [Host; 3] = [Host::Darwin, Host::Linux, Host::Windows];

    /// Classify a platform identifier such as `linux`, `darwin`, `macos` or `win32`
    pub fn from_platform(platform: &str) -> Result<Self> {
        if platform.starts_with("linux") {
            Ok(Host::Linux)
        } else if platform.starts_with("darwin") || platform.starts_with("macos") {
            Ok(Host::Darwin)
        } else if platform.starts_with("win") {
            Ok(Host::Windows)
        } else {
            Err(CmakeError::UnsupportedHost(platform.to_string()))
        }
    }

    /// The host this process runs on
    pub fn current() -> Result<Self> {
        Self::from_platform(std::env::consts::OS)
    }

    /// Lowercase name used in package names
    pub fn as_str(self) -> &'static str {
        match self {
            Host::Darwin => "darwin",
            Host::Linux => "linux",
            Host::Windows => "windows",
        }
    }

    /// Policy record for this host
    pub fn policy(self) -> &'static HostPolicy {
        match self {
            Host::Darwin => &DARWIN,
            Host::Linux => &LINUX,
            Host::Windows => &WINDOWS,
        }
    }

    /// File name of an executable called `stem` on this host
    pub fn executable(self, stem: &str) -> String {
        format!("{}{}", stem, self.policy().exe_suffix)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_platform_prefixes() {
        assert_eq!(Host::from_platform("linux").unwrap(), Host::Linux);
        assert_eq!(Host::from_platform("linux2").unwrap(), Host::Linux);
        assert_eq!(Host::from_platform("darwin").unwrap(), Host::Darwin);
        assert_eq!(Host::from_platform("macos").unwrap(), Host::Darwin);
        assert_eq!(Host::from_platform("win32").unwrap(), Host::Windows);
        assert_eq!(Host::from_platform("windows").unwrap(), Host::Windows);
    }

    #[test]
    fn test_unsupported_platform() {
        match Host::from_platform("freebsd") {
            Err(CmakeError::UnsupportedHost(name)) => assert_eq!(name, "freebsd"),
            other => panic!("Expected UnsupportedHost, got {:?}", other),
        }
    }

    #[test]
    fn test_current_host_resolves() {
        // CI only runs on the three supported platforms
        assert!(Host::current().is_ok());
    }

    #[test]
    fn test_install_target_strips_except_windows() {
        assert_eq!(Host::Windows.policy().install_target, "install");
        assert_eq!(Host::Linux.policy().install_target, "install/strip");
        assert_eq!(Host::Darwin.policy().install_target, "install/strip");
    }

    #[test]
    fn test_executable_names() {
        assert_eq!(Host::Windows.executable("cmake"), "cmake.exe");
        assert_eq!(Host::Linux.executable("cmake"), "cmake");
        assert_eq!(Host::Darwin.to_string(), "darwin");
    }

    #[test]
    fn test_host_defines() {
        assert_eq!(
            Host::Linux.policy().defines,
            &[("OPENSSL_USE_STATIC_LIBS", "ON")]
        );
        assert_eq!(
            Host::Darwin.policy().defines,
            &[("CMAKE_OSX_DEPLOYMENT_TARGET", "10.9")]
        );
        assert!(Host::Windows.policy().defines.is_empty());
    }
}
