use crate::config::Expectations;
use std::fmt;

/// The kinds of file the deployment tool is known to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    IgnoreFile,
    DependencyManifest,
    SettingsFile,
    Other,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::IgnoreFile => "ignore file",
            FileKind::DependencyManifest => "dependency manifest",
            FileKind::SettingsFile => "settings file",
            FileKind::Other => "unrecognized file",
        };
        f.write_str(name)
    }
}

type Matcher = fn(&str, &Expectations) -> bool;

/// Checked in order; the first match wins
const MATCHERS: [(Matcher, FileKind); 3] = [
    (is_ignore_file, FileKind::IgnoreFile),
    (is_dependency_manifest, FileKind::DependencyManifest),
    (is_settings_file, FileKind::SettingsFile),
];

fn is_ignore_file(name: &str, exp: &Expectations) -> bool {
    name == exp.ignore_file_name
}

fn is_dependency_manifest(name: &str, exp: &Expectations) -> bool {
    exp.dependency_manifests.iter().any(|manifest| manifest == name)
}

fn is_settings_file(name: &str, exp: &Expectations) -> bool {
    name == exp.settings_file_name
}

/// Classify a repository-relative path by its final component
pub fn classify(path: &str, expectations: &Expectations) -> FileKind {
    let name = file_name(path);

    MATCHERS
        .iter()
        .find(|(matches, _)| matches(name, expectations))
        .map(|(_, kind)| *kind)
        .unwrap_or(FileKind::Other)
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
