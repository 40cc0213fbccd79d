pub mod audit;
pub mod config;
pub mod error;
pub mod git;
pub mod verify;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{AppError, AppResult, GitError, VerifyError};
pub use git::Repository;
pub use verify::{DeployGuard, FileKind, verify_diff, verify_status};
