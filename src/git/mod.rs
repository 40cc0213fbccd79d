pub mod executor;
pub mod parser;
pub mod repository;

// Re-export commonly used types
pub use executor::{CommandOutput, GitExecutor};
pub use parser::{DiffSegment, FileStatus, StatusLine, parse_status_porcelain, segment_diff};
pub use repository::Repository;
