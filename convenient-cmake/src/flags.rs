//! Compiler and linker flag derivation

use crate::host::Host;

/// Compiler and linker flags for one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainFlags {
    pub cflags: Vec<&'static str>,
    pub ldflags: Vec<&'static str>,
}

impl ToolchainFlags {
    /// Derive the flags for `host` from its policy record
    pub fn for_host(host: Host) -> Self {
        let policy = host.policy();
        Self {
            cflags: policy.cflags.to_vec(),
            ldflags: policy.ldflags.to_vec(),
        }
    }

    /// Space-joined compiler flags, as injected into the ASM/C/C++ flag keys
    pub fn cflags_string(&self) -> String {
        self.cflags.join(" ")
    }

    /// Space-joined linker flags, as injected into the EXE/SHARED/MODULE keys
    pub fn ldflags_string(&self) -> String {
        self.ldflags.join(" ")
    }
}
