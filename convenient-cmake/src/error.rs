//! Error types for host resolution and define derivation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the host or deriving configure defines
#[derive(Debug, Error)]
pub enum CmakeError {
    #[error("Unsupported host: {0}")]
    UnsupportedHost(String),

    #[error("No clang-r* toolchain found in {0}")]
    ToolchainNotFound(PathBuf),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CmakeError>;
