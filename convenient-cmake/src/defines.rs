//! Configure-define derivation
//!
//! Builds the ordered `-D` map handed to `cmake` for a release build. Order is
//! preserved so the logged configure command line is reproducible.

use crate::error::Result;
use crate::flags::ToolchainFlags;
use crate::host::Host;
use crate::toolchain::{ToolchainPolicy, ToolchainSelection};
use std::path::PathBuf;

pub const BUILD_TYPE: &str = "CMAKE_BUILD_TYPE";
pub const INSTALL_PREFIX: &str = "CMAKE_INSTALL_PREFIX";
pub const MAKE_PROGRAM: &str = "CMAKE_MAKE_PROGRAM";
pub const C_COMPILER: &str = "CMAKE_C_COMPILER";
pub const CXX_COMPILER: &str = "CMAKE_CXX_COMPILER";

/// Keys that receive the space-joined compiler flags
pub const COMPILER_FLAG_KEYS: [&str; 3] = ["CMAKE_ASM_FLAGS", "CMAKE_C_FLAGS", "CMAKE_CXX_FLAGS"];

/// Keys that receive the space-joined linker flags
pub const LINKER_FLAG_KEYS: [&str; 3] = [
    "CMAKE_EXE_LINKER_FLAGS",
    "CMAKE_SHARED_LINKER_FLAGS",
    "CMAKE_MODULE_LINKER_FLAGS",
];

/// Insertion-ordered map of configure defines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationMap {
    entries: Vec<(String, String)>,
}

impl ConfigurationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`; an existing key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `-D<key>=<value>` arguments in insertion order
    pub fn define_args(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("-D{}={}", k, v)).collect()
    }
}

/// Inputs that influence the derived defines
#[derive(Debug, Clone, Default)]
pub struct DefineInputs {
    /// Repository of clang snapshots overriding the system compilers
    pub clang_repo: Option<PathBuf>,

    /// How a missing clang repository is handled
    pub toolchain_policy: ToolchainPolicy,
}

/// Derive the release defines for `host`
///
/// The install prefix and make program are left to the caller.
pub fn cmake_defines(host: Host, inputs: &DefineInputs) -> Result<ConfigurationMap> {
    let mut defines = ConfigurationMap::new();
    defines.insert(BUILD_TYPE, "Release");

    if let Some(repo) = &inputs.clang_repo {
        if let Some(toolchain) = ToolchainSelection::resolve(host, repo, inputs.toolchain_policy)? {
            defines.insert(C_COMPILER, toolchain.c_compiler);
            defines.insert(CXX_COMPILER, toolchain.cxx_compiler);
        }
    }

    let flags = ToolchainFlags::for_host(host);
    let cflags = flags.cflags_string();
    let ldflags = flags.ldflags_string();

    for key in COMPILER_FLAG_KEYS {
        defines.insert(key, cflags.as_str());
    }
    for key in LINKER_FLAG_KEYS {
        defines.insert(key, ldflags.as_str());
    }

    for (key, value) in host.policy().defines {
        defines.insert(*key, *value);
    }

    Ok(defines)
}
