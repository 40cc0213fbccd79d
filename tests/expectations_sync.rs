// The status allow-list and the diff rules must agree on which files the
// deployment tool may touch.

use deploy_guard::config::{Config, Expectations};
use deploy_guard::verify::{DeployGuard, FileKind, classify};

#[test]
fn test_default_manifests_classify_as_manifests() {
    let exp = Expectations::default();

    for manifest in &exp.dependency_manifests {
        assert_eq!(
            classify(manifest, &exp),
            FileKind::DependencyManifest,
            "manifest not recognized: {}",
            manifest
        );
    }
}

#[test]
fn test_every_allowed_modified_file_has_a_diff_rule() {
    let exp = Expectations::default();
    let guard = DeployGuard::new(exp.clone());

    let mut files = vec![exp.ignore_file_name.clone(), format!("blog/{}", exp.settings_file_name)];
    files.extend(exp.dependency_manifests.iter().cloned());

    for file in files {
        assert!(guard.verify_status(&format!(" M {}", file), ""), "status refused: {}", file);
        assert_ne!(classify(&file, &exp), FileKind::Other, "no rule for: {}", file);
    }
}

#[test]
fn test_custom_expectations_flow_through_guard() {
    let mut config = Config::default_config();
    config.expectations.log_dir = "deploy_logs".to_string();
    config.expectations.installed_app = "my_deployer".to_string();
    let guard = DeployGuard::new(config.expectations);

    let diff = "diff --git a/.gitignore b/.gitignore
@@ -8,0 +9 @@
+deploy_logs/
diff --git a/blog/settings.py b/blog/settings.py
@@ -39,0 +40 @@
+    'my_deployer',";

    assert!(guard.verify_status(" M .gitignore\n M blog/settings.py\n?? deploy_logs/", diff));
    assert!(!guard.verify_status("?? dsd_logs/", ""));
}
