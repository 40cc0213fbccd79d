//! Verification of the changes a deployment run leaves in a project.
//!
//! The allow-list is closed: a pending change is accepted only when it is
//! one of the edits the deployment tool itself makes. Anything else,
//! including output that cannot be parsed, is refused.

pub mod kind;
pub mod rules;
pub mod verifier;

pub use kind::{FileKind, classify};
pub use verifier::{DeployGuard, verify_diff, verify_status};
