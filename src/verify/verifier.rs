use crate::config::Expectations;
use crate::error::{AppResult, VerifyError, VerifyResult};
use crate::git::parser::{self, DiffSegment, FileStatus, StatusLine};
use crate::git::Repository;
use crate::verify::kind::{self, FileKind};
use crate::verify::rules;

/// Decides whether a project's pending git state holds only the changes
/// the deployment tool is expected to make.
#[derive(Debug, Clone, Default)]
pub struct DeployGuard {
    expectations: Expectations,
}

impl DeployGuard {
    pub fn new(expectations: Expectations) -> Self {
        Self { expectations }
    }

    /// Check `git diff --unified=0` output, stopping at the first refused segment
    pub fn check_diff(&self, diff: &str) -> VerifyResult {
        for segment in parser::segment_diff(diff)? {
            self.check_segment(&segment)?;
        }
        Ok(())
    }

    pub fn verify_diff(&self, diff: &str) -> bool {
        self.check_diff(diff).is_ok()
    }

    /// Check `git status --porcelain` output, then the diff behind it.
    ///
    /// A clean tree is accepted without looking at the diff. Otherwise every
    /// status entry must be allow-listed and the diff must pass on its own.
    pub fn check_status(&self, status: &str, diff: &str) -> VerifyResult {
        let entries = parser::parse_status_porcelain(status)?;
        if entries.is_empty() {
            return Ok(());
        }

        if let Some(entry) = entries.iter().find(|entry| !self.status_allowed(entry)) {
            return Err(VerifyError::UnrecognizedStatusEntry {
                line: entry.to_string(),
            });
        }

        self.check_diff(diff)
    }

    pub fn verify_status(&self, status: &str, diff: &str) -> bool {
        self.check_status(status, diff).is_ok()
    }

    /// Capture status and diff from the repository and check them
    pub fn check_repository(&self, repo: &Repository) -> AppResult<()> {
        let status = repo.status_porcelain()?;
        let diff = repo.diff_unified_zero()?;

        self.check_status(&status, &diff)?;
        Ok(())
    }

    fn check_segment(&self, segment: &DiffSegment) -> VerifyResult {
        let kind = kind::classify(&segment.path, &self.expectations);
        let refuse = |line: &str| VerifyError::UnexpectedDiffContent {
            path: segment.path.clone(),
            kind,
            line: line.to_string(),
        };

        if segment.is_binary() {
            return Err(refuse("binary content"));
        }

        let added = segment.added_lines();
        match rules::first_violation(kind, &added, &self.expectations) {
            Some(line) => Err(refuse(line)),
            None => Ok(()),
        }
    }

    fn status_allowed(&self, entry: &StatusLine) -> bool {
        let kind = kind::classify(&entry.path, &self.expectations);

        match (entry.status, kind) {
            (FileStatus::Untracked, _) if self.is_log_dir(&entry.path) => true,
            (FileStatus::Modified, FileKind::IgnoreFile | FileKind::SettingsFile) => true,
            (
                FileStatus::Modified | FileStatus::Added | FileStatus::Untracked,
                FileKind::DependencyManifest,
            ) => true,
            _ => false,
        }
    }

    /// The log directory itself (`dsd_logs/`), or anything inside it, at the project root
    fn is_log_dir(&self, path: &str) -> bool {
        path.strip_prefix(self.expectations.log_dir.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Check status and diff against the default expectations
pub fn verify_status(status: &str, diff: &str) -> bool {
    DeployGuard::default().verify_status(status, diff)
}

/// Check a diff against the default expectations
pub fn verify_diff(diff: &str) -> bool {
    DeployGuard::default().verify_diff(diff)
}
