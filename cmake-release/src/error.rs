//! Release pipeline errors

use convenient_archive::ArchiveError;
use convenient_cmake::CmakeError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Any failure that aborts a release run
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error(transparent)]
    Cmake(#[from] CmakeError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed ({status}): {command}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("Missing artifact: {0}")]
    MissingArtifact(PathBuf),

    #[error("Unexpected version output: {0:?}")]
    MalformedVersion(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
