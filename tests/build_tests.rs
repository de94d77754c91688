//! Archive building through the real binary

mod common;

use common::{TestProject, archive_entries, archive_text};
use predicates::prelude::*;

#[test]
fn test_build_from_dist() {
    let project = TestProject::with_app();

    project
        .pychub()
        .args(["-e", "app.cli:main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built"))
        .stdout(predicate::str::contains("app-1.0.chub"));

    let archive = project.path.join("app-1.0.chub");
    assert_eq!(
        archive_entries(&archive),
        vec!["libs/app-1.0-py3-none-any.whl", ".chubconfig"]
    );

    let manifest = archive_text(&archive, ".chubconfig");
    assert!(manifest.contains("name: app"));
    assert!(manifest.contains("entrypoint: app.cli:main"));
    assert!(manifest.contains("primary: true"));
    assert!(manifest.contains("hash: blake3:"));
}

#[test]
fn test_build_full_layout() {
    let project = TestProject::with_app();
    project.write_file("scripts/pre.sh", "#!/bin/sh\necho pre\n");
    project.write_file("scripts/post.sh", "#!/bin/sh\necho post\n");
    project.write_file("README.md", "# app\n");
    project.write_file("conf/app.ini", "[app]\n");
    project.write_wheel("vendor", "helper-0.3-py3-none-any.whl", &[("helper.py", "")]);

    project
        .pychub()
        .args([
            "--add-wheel",
            "vendor/helper-0.3-py3-none-any.whl",
            "-e",
            "app",
            "--entrypoint-arg",
            "--verbose",
            "--pre-script",
            "scripts/pre.sh",
            "--post-script",
            "scripts/post.sh",
            "-i",
            "README.md::docs/README.md",
            "-i",
            "conf/app.ini",
            "-m",
            "team=core",
            "-m",
            "team=infra",
            "-c",
            "out/bundle.chub",
        ])
        .assert()
        .success();

    let archive = project.path.join("out/bundle.chub");
    assert_eq!(
        archive_entries(&archive),
        vec![
            "libs/app-1.0-py3-none-any.whl",
            "libs/helper-0.3-py3-none-any.whl",
            "scripts/pre/pre.sh",
            "scripts/post/post.sh",
            "includes/app.ini",
            "includes/docs/README.md",
            ".chubconfig",
        ]
    );
    assert_eq!(archive_text(&archive, "includes/docs/README.md"), "# app\n");

    let manifest = archive_text(&archive, ".chubconfig");
    let core = manifest.find("value: core").unwrap();
    let infra = manifest.find("value: infra").unwrap();
    assert!(core < infra);
    assert!(manifest.contains("--verbose"));
}

#[test]
fn test_script_lists_from_project_file_and_command_line() {
    let project = TestProject::with_app();
    project.write_file(
        "pyproject.toml",
        "[project]\nname = \"app\"\n\n[tool.pychub.package.scripts]\n\
         pre = [\"scripts/venv.sh\", \"scripts/pre.sh\"]\n",
    );
    project.write_file("scripts/venv.sh", "#!/bin/sh\n");
    project.write_file("scripts/pre.sh", "#!/bin/sh\n");
    project.write_file("scripts/late.sh", "#!/bin/sh\n");

    project
        .pychub()
        .args(["--pre-script", "scripts/late.sh"])
        .assert()
        .success();

    let archive = project.path.join("app-1.0.chub");
    assert_eq!(
        archive_entries(&archive),
        vec![
            "libs/app-1.0-py3-none-any.whl",
            "scripts/pre/venv.sh",
            "scripts/pre/pre.sh",
            "scripts/pre/late.sh",
            ".chubconfig",
        ]
    );
    let manifest = archive_text(&archive, ".chubconfig");
    let venv = manifest.find("- scripts/pre/venv.sh").unwrap();
    let late = manifest.find("- scripts/pre/late.sh").unwrap();
    assert!(venv < late);
}

#[test]
fn test_scripts_with_same_file_name_collide() {
    let project = TestProject::with_app();
    project.write_file("a/setup.sh", "#!/bin/sh\n");
    project.write_file("b/setup.sh", "#!/bin/sh\n");

    project
        .pychub()
        .args(["--post-script", "a/setup.sh", "--post-script", "b/setup.sh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scripts/post/setup.sh"));
}

#[test]
fn test_identical_inputs_give_identical_archives() {
    let project = TestProject::with_app();
    project.write_file("README.md", "# app\n");

    for output in ["first.chub", "second.chub"] {
        project
            .pychub()
            .args(["-e", "app.cli:main", "-i", "README.md", "-m", "k=v", "-c", output])
            .assert()
            .success();
    }

    let first = std::fs::read(project.path.join("first.chub")).unwrap();
    let second = std::fs::read(project.path.join("second.chub")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_script_keeps_previous_archive() {
    let project = TestProject::with_app();
    project.write_file("app-1.0.chub", "previous");

    project
        .pychub()
        .args(["--pre-script", "scripts/missing.sh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pre-install script not found"));

    assert_eq!(project.read_file("app-1.0.chub"), "previous");
    let leftovers: Vec<_> = std::fs::read_dir(&project.path)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_missing_include_fails() {
    let project = TestProject::with_app();
    project
        .pychub()
        .args(["-i", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Included file not found"));
    assert!(!project.file_exists("app-1.0.chub"));
}

#[test]
fn test_include_destination_collision_fails() {
    let project = TestProject::with_app();
    project.write_file("a/notes.txt", "a");
    project.write_file("b/notes.txt", "b");

    project
        .pychub()
        .args(["-i", "a/notes.txt", "-i", "b/notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("includes/notes.txt"));
}

#[test]
fn test_invalid_entrypoint_fails() {
    let project = TestProject::with_app();
    project
        .pychub()
        .args(["-e", "app.cli:nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid entrypoint 'app.cli:nope'"));
    assert!(!project.file_exists("app-1.0.chub"));
}

#[test]
fn test_wheel_collision_fails() {
    let project = TestProject::with_app();
    project
        .pychub()
        .args(["--add-wheel", "dist/app-1.0-py3-none-any.whl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wheel file name collision"));
}

#[test]
fn test_explicit_main_wheel() {
    let project = TestProject::new();
    project.write_wheel("build", "tool-2.0-py3-none-any.whl", &[("tool.py", "def run():\n    pass\n")]);

    project
        .pychub()
        .args(["build/tool-2.0-py3-none-any.whl", "-e", "tool:run"])
        .assert()
        .success();

    assert!(project.file_exists("tool-2.0.chub"));
}

#[test]
fn test_missing_main_wheel_fails() {
    let project = TestProject::new();
    project
        .pychub()
        .arg("dist/ghost-1.0-py3-none-any.whl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No wheel for"));
}

#[test]
fn test_remote_fetch_failure_reports_requirement() {
    let project = TestProject::with_app();
    project
        .pychub()
        .args([
            "--add-wheel",
            "requests>=2.31",
            "--python",
            "/nonexistent/bin/python3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch 'requests>=2.31'"));
    assert!(!project.file_exists("app-1.0.chub"));
}
