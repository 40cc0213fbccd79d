use crate::error::VerifyError;
use std::fmt;

const SEGMENT_HEADER: &str = "diff --git ";

/// Parse `git status --porcelain` (v1) output
///
/// Blank lines are skipped; every other line must be `XY <path>`.
pub fn parse_status_porcelain(output: &str) -> Result<Vec<StatusLine>, VerifyError> {
    let mut entries = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        entries.push(StatusLine::parse(line)?);
    }

    Ok(entries)
}

/// Split `git diff --unified=0` output into one segment per file, in diff order
pub fn segment_diff(output: &str) -> Result<Vec<DiffSegment>, VerifyError> {
    let mut segments: Vec<DiffSegment> = Vec::new();

    for line in output.lines() {
        if let Some(rest) = line.strip_prefix(SEGMENT_HEADER) {
            let path = parse_header_path(rest).ok_or_else(|| {
                VerifyError::MalformedInput(format!("unreadable diff header `{}`", line))
            })?;
            segments.push(DiffSegment {
                path,
                lines: Vec::new(),
            });
            continue;
        }

        match segments.last_mut() {
            Some(segment) => segment.lines.push(line.to_string()),
            None if line.trim().is_empty() => {}
            None => {
                return Err(VerifyError::MalformedInput(format!(
                    "diff content before any file header: `{}`",
                    line
                )));
            }
        }
    }

    Ok(segments)
}

/// Extract the `b/` side path from the remainder of a `diff --git` header
fn parse_header_path(rest: &str) -> Option<String> {
    // Paths with unusual characters are quoted: "a/x y" "b/x y"
    if let Some(quoted) = rest.strip_prefix("\"a/") {
        let idx = quoted.rfind("\" \"b/")?;
        let path = quoted[idx + 5..].strip_suffix('"')?;
        return (!path.is_empty()).then(|| path.to_string());
    }

    let rest = rest.strip_prefix("a/")?;
    let idx = rest.rfind(" b/")?;
    let path = &rest[idx + 3..];
    (!path.is_empty()).then(|| path.to_string())
}

/// One line of `git status --porcelain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: String,
    pub status: FileStatus,
    pub path: String,
}

impl StatusLine {
    fn parse(line: &str) -> Result<Self, VerifyError> {
        let malformed = || VerifyError::MalformedInput(format!("unreadable status line `{}`", line));

        let code = line.get(..2).ok_or_else(malformed)?;
        let path = line
            .get(2..)
            .and_then(|rest| rest.strip_prefix(' '))
            .filter(|path| !path.is_empty())
            .ok_or_else(malformed)?;

        Ok(StatusLine {
            code: code.to_string(),
            status: FileStatus::from_code(code),
            path: path.to_string(),
        })
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Modified,
    Added,
    Deleted,
    Untracked,
    Unknown,
}

impl FileStatus {
    /// Map a two-character porcelain code to a status
    pub fn from_code(code: &str) -> Self {
        match code {
            "??" => FileStatus::Untracked,
            "A " | "AM" => FileStatus::Added,
            " M" | "M " | "MM" => FileStatus::Modified,
            _ if code.contains('D') => FileStatus::Deleted,
            _ => FileStatus::Unknown,
        }
    }
}

/// One file's portion of a unified diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    /// Path as it appears on the `b/` side of the header
    pub path: String,
    /// Raw lines following the header, up to the next header
    pub lines: Vec<String>,
}

impl DiffSegment {
    /// Added lines with the `+` marker stripped.
    ///
    /// Only lines inside a hunk count; file markers, "no newline" markers and
    /// whitespace-only additions are dropped.
    pub fn added_lines(&self) -> Vec<&str> {
        let mut in_hunk = false;

        self.lines
            .iter()
            .filter_map(|line| {
                if line.starts_with("@@") {
                    in_hunk = true;
                    return None;
                }
                if !in_hunk {
                    return None;
                }
                let content = line.strip_prefix('+')?;
                (!content.trim().is_empty()).then_some(content)
            })
            .collect()
    }

    /// Whether git reported this file as binary, so its content can't be inspected
    pub fn is_binary(&self) -> bool {
        self.lines
            .iter()
            .take_while(|line| !line.starts_with("@@"))
            .any(|line| line.starts_with("Binary files ") || line == "GIT binary patch")
    }
}
