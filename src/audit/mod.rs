pub mod logger;

pub use logger::{Outcome, VerificationLog};
