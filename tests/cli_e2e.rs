#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn coursekit(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("coursekit"));
    cmd.env("COURSEKIT_DATA", data.path().as_os_str())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_module_link_move_search_delete_workflow() {
    let data = TempDir::new().unwrap();

    // 1. Empty course
    coursekit(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing here yet"));

    // 2. Create a module and a top-level link
    coursekit(&data)
        .args(["module", "add", "Week 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created module 'Week 1'"));
    coursekit(&data)
        .args(["link", "add", "Syllabus", "x.edu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added link 'Syllabus'"));

    coursekit(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unassigned"))
        .stdout(predicate::str::contains("https://x.edu"));

    // 3. Move it into the module by title and position
    coursekit(&data)
        .args(["mv", "syllabus", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 'Syllabus' to module 'Week 1'"));

    // moving again is a no-op
    coursekit(&data)
        .args(["mv", "Syllabus", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in module 'Week 1'"));

    // 4. Search finds the module through its resource
    coursekit(&data)
        .args(["search", "x.edu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 1"))
        .stdout(predicate::str::contains("1 module(s)"));
    coursekit(&data)
        .args(["search", "week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 1"))
        .stdout(predicate::str::contains("No resources match your search in this module."))
        .stdout(predicate::str::contains("Syllabus").not());
    coursekit(&data)
        .args(["search", "quantum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));

    // 5. Delete the module; the link comes back unassigned
    coursekit(&data)
        .args(["--yes", "module", "rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted module 'Week 1'"))
        .stdout(predicate::str::contains("1 resource(s) moved back"));

    let raw = fs::read_to_string(data.path().join("course-resources.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved[0]["title"], "Syllabus");
    assert!(saved[0].get("moduleId").is_none());
}

#[test]
fn test_duplicate_link_is_a_warning() {
    let data = TempDir::new().unwrap();
    coursekit(&data)
        .args(["link", "add", "Syllabus", "https://x.edu"])
        .assert()
        .success();

    coursekit(&data)
        .args(["link", "add", "Other", "https://x.edu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_invalid_module_name_reports_field() {
    let data = TempDir::new().unwrap();
    coursekit(&data)
        .args(["module", "add", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name:"))
        .stderr(predicate::str::contains("at least 2 characters"));
}

#[test]
fn test_declined_delete_keeps_resource() {
    let data = TempDir::new().unwrap();
    coursekit(&data)
        .args(["link", "add", "Forum", "forum.io"])
        .assert()
        .success();

    coursekit(&data)
        .args(["rm", "forum"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    coursekit(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Forum"));
}

#[test]
fn test_file_add_uses_file_name_as_title() {
    let data = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    let path = docs.path().join("lecture-notes.pdf");
    fs::write(&path, b"%PDF-1.4").unwrap();

    coursekit(&data)
        .args(["file", "add"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added file 'lecture-notes'"));

    coursekit(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("lecture-notes.pdf · 8 Bytes"));
}

#[test]
fn test_doctor_on_clean_data() {
    let data = TempDir::new().unwrap();
    coursekit(&data)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("No inconsistencies found."));
}
