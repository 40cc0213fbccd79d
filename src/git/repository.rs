use crate::error::{GitError, GitResult};
use crate::git::executor::GitExecutor;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A project under version control, and the git output verification needs from it
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: GitExecutor,
}

impl Repository {
    /// Detect git repository from current working directory
    pub fn discover() -> GitResult<Self> {
        let current_dir = env::current_dir().map_err(GitError::IoError)?;

        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> GitResult<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            if current.join(".git").exists() {
                return Ok(Self::new(current));
            }

            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Create a Repository for a known git directory
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let executor = GitExecutor::new(&path);

        Self { path, executor }
    }

    /// Set the deadline for each git invocation
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.executor = self.executor.with_timeout(timeout);
        self
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw `git status --porcelain` output
    pub fn status_porcelain(&self) -> GitResult<String> {
        Ok(self.executor.execute(&["status", "--porcelain"])?.stdout)
    }

    /// Raw `git diff --unified=0` output for everything not yet committed.
    ///
    /// Staged and unstaged edits are both compared with HEAD, or with the
    /// empty tree before the first commit. Prefixes are pinned to `a/` and
    /// `b/` whatever the user's diff config says.
    pub fn diff_unified_zero(&self) -> GitResult<String> {
        let base = self.diff_base()?;
        let args = [
            "diff",
            base.as_str(),
            "--unified=0",
            "--no-color",
            "--no-ext-diff",
            "--no-renames",
            "--src-prefix=a/",
            "--dst-prefix=b/",
            "--",
        ];
        Ok(self.executor.execute(&args)?.stdout)
    }

    fn diff_base(&self) -> GitResult<String> {
        match self.executor.execute(&["rev-parse", "--verify", "--quiet", "HEAD"]) {
            Ok(_) => Ok("HEAD".to_string()),
            // No commits yet
            Err(GitError::CommandFailed(_)) => {
                let empty_tree = self.executor.execute(&["hash-object", "-t", "tree", "--stdin"])?;
                Ok(empty_tree.stdout.trim().to_string())
            }
            Err(e) => Err(e),
        }
    }
}
