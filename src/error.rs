use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;
use crate::verify::FileKind;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("Git command timed out after {0} seconds: git {1}")]
    Timeout(u64, String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Reasons a project's pending git state was refused
///
/// The Display text is shown to the user as-is, so each variant says what
/// was found and what to do about it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error(
        "Pending changes detected: `{line}`.\n\
         Commit or stash your changes before configuring the project for deployment."
    )]
    UnrecognizedStatusEntry { line: String },

    #[error(
        "Unexpected change in {path} ({kind}): `{line}`.\n\
         Resolve this change before configuring the project for deployment."
    )]
    UnexpectedDiffContent {
        path: String,
        kind: FileKind,
        line: String,
    },

    #[error(
        "Could not interpret git output: {0}.\n\
         The project's git state cannot be verified; commit your changes and try again."
    )]
    MalformedInput(String),
}

/// Top-level application error that wraps all module-specific errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Verify(#[from] VerifyError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for verification passes
pub type VerifyResult = std::result::Result<(), VerifyError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
