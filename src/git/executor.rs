use crate::error::{GitError, GitResult};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of executing a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Executes git commands within a project directory
#[derive(Debug)]
pub struct GitExecutor {
    repo_path: PathBuf,
    timeout: Duration,
}

impl GitExecutor {
    /// Create a new GitExecutor for the given repository path
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Use a different deadline for every command run by this executor
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute a git command and return the output
    ///
    /// Arguments are passed to git directly, without a shell.
    /// Example: executor.execute(&["status", "--porcelain"])
    pub fn execute(&self, args: &[&str]) -> GitResult<CommandOutput> {
        self.execute_with_timeout(args, self.timeout)
    }

    /// Execute a git command with a custom timeout
    pub fn execute_with_timeout(&self, args: &[&str], timeout: Duration) -> GitResult<CommandOutput> {
        if args.is_empty() {
            return Err(GitError::CommandFailed("Empty command".to_string()));
        }

        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GitError::CommandFailed(format!("Failed to execute git: {}", e)))?;

        // Drain both pipes while waiting so a large diff can't block the child
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let command = args.join(" ");
        let exit_code = wait_with_deadline(&mut child, timeout, &command)?;

        let cmd_output = CommandOutput {
            stdout: join_reader(stdout),
            stderr: join_reader(stderr),
            exit_code,
            success: exit_code == 0,
        };

        if !cmd_output.success {
            return Err(GitError::CommandFailed(format!(
                "Command 'git {}' failed with exit code {}: {}",
                command,
                exit_code,
                cmd_output.stderr.trim()
            )));
        }

        Ok(cmd_output)
    }

    /// Get the repository path
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}

fn wait_with_deadline(child: &mut Child, timeout: Duration, command: &str) -> GitResult<i32> {
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status.code().unwrap_or(-1));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(GitError::Timeout(timeout.as_secs(), command.to_string()));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut bytes = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut bytes);
        }
        String::from_utf8_lossy(&bytes).into_owned()
    })
}

fn join_reader(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
