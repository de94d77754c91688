//! CLI integration tests using the real pychub binary

mod common;

use common::TestProject;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    TestProject::new()
        .pychub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Package a Python wheel"))
        .stdout(predicate::str::contains("--add-wheel"))
        .stdout(predicate::str::contains("--chubproject-save"))
        .stdout(predicate::str::contains("--entrypoint"));
}

#[test]
fn test_version_output() {
    TestProject::new()
        .pychub()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pychub"));
}

#[test]
fn test_unknown_flag_fails() {
    TestProject::new()
        .pychub()
        .arg("--no-such-flag")
        .assert()
        .failure();
}

#[test]
fn test_invalid_jobs_value_fails() {
    TestProject::new()
        .pychub()
        .args(["--jobs", "many"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_table_name_fails() {
    let project = TestProject::with_app();
    project
        .pychub()
        .args(["-t", "tool.other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid table 'tool.other'"));
    assert!(!project.file_exists("app-1.0.chub"));
}

#[test]
fn test_malformed_metadata_entry_fails() {
    TestProject::with_app()
        .pychub()
        .args(["-m", "no-equals-sign"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_project_path_must_exist() {
    TestProject::new()
        .pychub()
        .args(["--project-path", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    TestProject::with_app()
        .pychub()
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("Main wheel"));
}
