//! End-to-end tests running the `github-workflow-gen` binary.

use std::path::Path;
use std::process::{Command, Output};

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_github-workflow-gen"))
        .current_dir(dir)
        .env_remove("GITHUB_WORKFLOW_GEN_TEMPLATES")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_build_writes_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["build", "--solution-name", "App.sln", "--sonar-key", "app"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("build.yml was successfully generated."));

    let written = std::fs::read_to_string(dir.path().join("build.yml")).unwrap();
    assert!(written.contains("--configuration Debug App.sln"));
    assert!(!written.contains("pull_request:"));
}

#[test]
fn test_missing_required_option_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["build", "--sonar-key", "app"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERROR]"), "{stderr}");
    assert!(stderr.contains("solution-name"), "{stderr}");
    assert!(!dir.path().join("build.yml").exists());
}

#[test]
fn test_no_on_pull_requests_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("workflows.json"),
        r#"{ "build": { "solution_name": "App.sln", "sonar_key": "app", "on_pull_requests": true } }"#,
    )
    .unwrap();

    let output = run(dir.path(), &["--config", "workflows.json", "build"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let written = std::fs::read_to_string(dir.path().join("build.yml")).unwrap();
    assert!(written.contains("pull_request:"));

    let output = run(
        dir.path(),
        &["--config", "workflows.json", "build", "--no-on-pull-requests"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let written = std::fs::read_to_string(dir.path().join("build.yml")).unwrap();
    assert!(!written.contains("pull_request:"));
}

#[test]
fn test_no_skip_lambda_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("workflows.json"),
        r#"{ "release": { "repository_name": "registry", "repository_prefix": "r", "jira_prefix": "Registry", "skip_lambda": true } }"#,
    )
    .unwrap();

    // With lambda back on, the lambda source folder becomes required again.
    let output = run(
        dir.path(),
        &["--config", "workflows.json", "release", "--no-skip-lambda"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERROR]"), "{stderr}");
    assert!(stderr.contains("lambda-source-folder"), "{stderr}");

    let output = run(
        dir.path(),
        &[
            "--config",
            "workflows.json",
            "release",
            "--no-skip-lambda",
            "--lambda-source-folder",
            "dist/lambda",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let written = std::fs::read_to_string(dir.path().join("release.yml")).unwrap();
    assert!(written.contains("dist/lambda"));
}

#[test]
fn test_config_file_supplies_values() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("workflows.json"),
        r#"{ "releaselib": { "nuget_packages": ["Lib.A", "Lib.B"], "jira_prefix": "Lib", "file_name": "lib.yml" } }"#,
    )
    .unwrap();

    let output = run(
        dir.path(),
        &["--config", "workflows.json", "releaselib", "--workflow-name", "Publish"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let written = std::fs::read_to_string(dir.path().join("lib.yml")).unwrap();
    assert!(written.starts_with("name: Publish\n"));
    assert!(written.contains("dist/Lib.B/Lib.B.$SEMVER.nupkg"));
    assert!(written.contains("JIRA_PREFIX: Lib"));
}

#[test]
fn test_uneven_nuget_pairs_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &[
            "release",
            "--repository-name",
            "registry",
            "--repository-prefix",
            "r",
            "--jira-prefix",
            "Registry",
            "--skip-lambda",
            "--nuget-packages",
            "api",
        ],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("[ERROR]"));
    assert!(!dir.path().join("release.yml").exists());
}

#[test]
fn test_templates_dir_override() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("templates");
    std::fs::create_dir(&templates).unwrap();
    std::fs::write(templates.join("build.yml"), "solution: {{SolutionName}}\n").unwrap();

    let output = run(
        dir.path(),
        &[
            "--templates-dir",
            "templates",
            "build",
            "--solution-name",
            "App.sln",
            "--sonar-key",
            "app",
            "--file-name",
            "out/build.yml",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out/build.yml")).unwrap(),
        "solution: App.sln\n"
    );
}
