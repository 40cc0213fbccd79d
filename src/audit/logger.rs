use chrono::Utc;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Result of one verification pass, as recorded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted => f.write_str("ACCEPTED"),
            Outcome::Rejected => f.write_str("REJECTED"),
        }
    }
}

/// Appends one line per verification to a log inside the project's log directory
pub struct VerificationLog {
    log_path: PathBuf,
}

impl VerificationLog {
    /// Log to `<project>/<log_dir>/<file_name>` as configured
    pub fn for_project<P: AsRef<Path>>(project: P, config: &Config) -> std::io::Result<Self> {
        let log_path = project
            .as_ref()
            .join(&config.expectations.log_dir)
            .join(&config.logging.file_name);

        Self::with_path(log_path)
    }

    /// Create a VerificationLog with a custom log path
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    /// Record a verification outcome
    ///
    /// Multi-line reasons are folded onto one line.
    pub fn record(&self, outcome: Outcome, project: &Path, reason: &str) -> std::io::Result<()> {
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
        let reason = reason.lines().map(str::trim).collect::<Vec<_>>().join(" ");

        let log_entry = format!(
            "[{}] [{}] [{}] [{}] {}\n",
            timestamp,
            user,
            project.display(),
            outcome,
            reason
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(log_entry.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.log_path)?;
        if metadata.len() > MAX_LOG_SIZE {
            // verification.log -> verification.log.1
            let backup_path = self.log_path.with_extension("log.1");
            fs::rename(&self.log_path, backup_path)?;
        }

        Ok(())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_for_project_uses_log_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::default_config();

        let log = VerificationLog::for_project(temp_dir.path(), &config).unwrap();
        assert_eq!(
            log.log_path(),
            temp_dir.path().join("dsd_logs").join("verification.log")
        );
        assert!(temp_dir.path().join("dsd_logs").is_dir());
    }

    #[test]
    fn test_record_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let log = VerificationLog::with_path(&log_path).unwrap();
        log.record(Outcome::Accepted, Path::new("/test/blog"), "Git status is acceptable.")
            .unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("[ACCEPTED]"));
        assert!(content.contains("/test/blog"));
        assert!(content.contains("Git status is acceptable."));
    }

    #[test]
    fn test_record_folds_multiline_reason() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let log = VerificationLog::with_path(&log_path).unwrap();
        log.record(
            Outcome::Rejected,
            Path::new("/test/blog"),
            "Pending changes detected: `?? notes.txt`.\nCommit or stash your changes.",
        )
        .unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("[REJECTED] Pending changes detected: `?? notes.txt`. Commit"));
    }

    #[test]
    fn test_multiple_entries() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let log = VerificationLog::with_path(&log_path).unwrap();
        let project = Path::new("/test/blog");

        log.record(Outcome::Rejected, project, "first").unwrap();
        log.record(Outcome::Accepted, project, "second").unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[REJECTED] first"));
        assert!(lines[1].ends_with("[ACCEPTED] second"));
    }

    #[test]
    fn test_log_rotation() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let log = VerificationLog::with_path(&log_path).unwrap();
        let project = Path::new("/test/blog");

        let large_reason = "x".repeat(MAX_LOG_SIZE as usize);
        log.record(Outcome::Rejected, project, &large_reason).unwrap();

        // Second entry should trigger rotation
        log.record(Outcome::Accepted, project, "after rotation").unwrap();

        let backup_path = log_path.with_extension("log.1");
        assert!(backup_path.exists());

        let metadata = fs::metadata(&log_path).unwrap();
        assert!(metadata.len() < MAX_LOG_SIZE);
    }
}
