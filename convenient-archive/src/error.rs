//! Packaging errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a package
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Missing artifact: {0}")]
    MissingArtifact(PathBuf),

    #[error("Expected exactly one directory matching {pattern}, found {matches}")]
    ModuleDirectory { pattern: String, matches: usize },

    #[error("Path cannot be archived: {0}")]
    InvalidPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
