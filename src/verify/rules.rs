//! Per-kind acceptance rules over the lines a diff adds to one file.
//!
//! Each rule only looks at added lines. Removed lines can't introduce
//! anything into the project, so they are never policed.

use crate::config::Expectations;
use crate::verify::kind::FileKind;

/// Return the first added line the rule for `kind` refuses, if any
pub fn first_violation<'a>(
    kind: FileKind,
    added: &[&'a str],
    expectations: &Expectations,
) -> Option<&'a str> {
    added
        .iter()
        .copied()
        .find(|line| !line_allowed(kind, line, expectations))
}

/// Whether every added line is acceptable for a file of this kind
pub fn accepts(kind: FileKind, added: &[&str], expectations: &Expectations) -> bool {
    first_violation(kind, added, expectations).is_none()
}

fn line_allowed(kind: FileKind, line: &str, exp: &Expectations) -> bool {
    match kind {
        FileKind::IgnoreFile => is_log_dir_pattern(line, exp),
        FileKind::DependencyManifest => names_package(line, &exp.package_name),
        FileKind::SettingsFile => registers_app(line, &exp.installed_app),
        FileKind::Other => false,
    }
}

/// `dsd_logs/`
fn is_log_dir_pattern(line: &str, exp: &Expectations) -> bool {
    line.trim()
        .strip_suffix('/')
        .is_some_and(|dir| dir == exp.log_dir)
}

/// `django-simple-deploy`, `django-simple-deploy>=1.0,<2`, `django-simple-deploy = "^1.0"`,
/// or a quoted array entry of either of the first two
fn names_package(line: &str, package: &str) -> bool {
    let entry = strip_trailing_comma(line.trim());
    let entry = unquote(entry).unwrap_or(entry);

    let split = entry
        .find(|c: char| matches!(c, '=' | '<' | '>' | '!' | '~') || c.is_whitespace())
        .unwrap_or(entry.len());
    let (name, rest) = entry.split_at(split);
    if normalize_name(name) != normalize_name(package) {
        return false;
    }

    let rest = rest.trim();
    if rest.is_empty() {
        return true;
    }

    // Pipfile / Poetry assignment: only a quoted version string, never a table
    match rest.strip_prefix('=') {
        Some(value) if !value.starts_with('=') => {
            unquote(value.trim()).is_some_and(is_version_constraint)
        }
        _ => is_version_specifier(rest),
    }
}

/// PEP 440 clauses: `==1.2`, `>=1.0,<2`, `~= 1.4.2`
fn is_version_specifier(spec: &str) -> bool {
    spec.split(',').all(|clause| {
        let clause = clause.trim();
        ["===", "==", "!=", "~=", ">=", "<=", ">", "<"]
            .iter()
            .find_map(|op| clause.strip_prefix(*op))
            .is_some_and(|version| is_version(version.trim()))
    })
}

/// Pipfile / Poetry values: `*`, `^1.0`, `~1.0`, `1.0`, or PEP 440 clauses
fn is_version_constraint(value: &str) -> bool {
    let value = value.trim();
    let bare = value.strip_prefix(['^', '~']).unwrap_or(value);

    value == "*" || is_version(bare) || is_version_specifier(value)
}

fn is_version(version: &str) -> bool {
    !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '*' | '+' | '!' | '-' | '_'))
}

/// `'django_simple_deploy',` as an INSTALLED_APPS entry
fn registers_app(line: &str, app: &str) -> bool {
    unquote(strip_trailing_comma(line.trim())).is_some_and(|name| name == app)
}

fn strip_trailing_comma(entry: &str) -> &str {
    entry.strip_suffix(',').map(str::trim_end).unwrap_or(entry)
}

/// Strip one matching pair of single or double quotes
fn unquote(entry: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        entry
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

/// Package names compare case-insensitively, with `-`, `_` and `.` interchangeable
fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '_' | '.' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
