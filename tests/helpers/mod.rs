#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const GITIGNORE: &str = "__pycache__/\n*.pyc\ndb.sqlite3\n";

pub const REQUIREMENTS: &str = "asgiref==3.7.2\nDjango==4.2.7\nsqlparse==0.4.4\n";

pub const SETTINGS: &str = "\"\"\"Django settings for blog project.\"\"\"

DEBUG = True

INSTALLED_APPS = [
    'blogs',
    'django.contrib.admin',
    'django.contrib.auth',
]

DEFAULT_AUTO_FIELD = 'django.db.models.BigAutoField'
";

/// Helper to create a test git repository
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"]);
    git(&repo_path, &["config", "user.name", "Test User"]);
    git(&repo_path, &["config", "user.email", "test@example.com"]);

    (temp_dir, repo_path)
}

/// Helper to create a committed sample Django project
pub fn create_sample_project() -> (TempDir, PathBuf) {
    let (temp_dir, repo_path) = create_test_repo();

    fs::create_dir(repo_path.join("blog")).expect("Failed to create blog/");
    write(&repo_path, ".gitignore", GITIGNORE);
    write(&repo_path, "requirements.txt", REQUIREMENTS);
    write(&repo_path, "blog/settings.py", SETTINGS);
    write(&repo_path, "manage.py", "import os\n");

    git(&repo_path, &["add", "."]);
    git(&repo_path, &["commit", "-m", "Initial commit"]);

    (temp_dir, repo_path)
}

/// Make the edits the deployment tool makes when configuring a project
pub fn apply_expected_edits(repo_path: &Path) {
    write(repo_path, ".gitignore", &format!("{}\ndsd_logs/\n", GITIGNORE));
    write(
        repo_path,
        "requirements.txt",
        &format!("{}django-simple-deploy\n", REQUIREMENTS),
    );
    write(
        repo_path,
        "blog/settings.py",
        &SETTINGS.replace(
            "INSTALLED_APPS = [\n",
            "INSTALLED_APPS = [\n    'django_simple_deploy',\n",
        ),
    );
    fs::create_dir_all(repo_path.join("dsd_logs")).expect("Failed to create dsd_logs/");
    write(repo_path, "dsd_logs/deploy_run.log", "Configuring project for deployment...\n");
}

pub fn write(repo_path: &Path, file: &str, content: &str) {
    fs::write(repo_path.join(file), content).expect("Failed to write file");
}

pub fn git(repo_path: &Path, args: &[&str]) {
    Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .expect("Failed to run git");
}
