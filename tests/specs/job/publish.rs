//! Publishing specs

use crate::prelude::*;

#[test]
fn log_publisher_marks_job_published() {
    Project::empty()
        .jr()
        .args(&[
            "run",
            "--name",
            "report",
            "--provider",
            "echo",
            "--publisher",
            "log",
            "--payload",
            "done",
        ])
        .passes()
        .stdout_has("State: PUBLISHED")
        .stdout_has("- Initialized log");
}

#[test]
fn file_publisher_writes_job_json() {
    let project = Project::empty();
    let ran = project
        .jr()
        .args(&[
            "-o",
            "json",
            "run",
            "--name",
            "report",
            "--provider",
            "echo",
            "--publisher",
            "file",
            "--payload",
            "contents",
        ])
        .passes();

    let uuid = ran.json()["uuid"].as_str().unwrap().to_string();
    assert_eq!(ran.json()["state"], "PUBLISHED");

    let path = project
        .state_dir()
        .join("published")
        .join(format!("{uuid}.json"));
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written["uuid"], uuid.as_str());
    assert_eq!(written["result"], "contents");
}

#[test]
fn file_publisher_that_cannot_initialize_fails_the_job() {
    let project = Project::empty();
    project.file("blocker", "a file, not a directory");
    project.file("jobrelay.toml", "[publishers.file]\ndir = \"blocker/out\"\n");

    project
        .jr()
        .args(&[
            "run",
            "--name",
            "report",
            "--provider",
            "echo",
            "--publisher",
            "file",
            "--payload",
            "x",
        ])
        .exits(2)
        .stdout_has("State: FAILED")
        .stdout_has("Unable to initialize file");
}

#[test]
fn unknown_publisher_fails_the_job() {
    Project::empty()
        .jr()
        .args(&[
            "run",
            "--name",
            "report",
            "--provider",
            "echo",
            "--publisher",
            "slack",
            "--payload",
            "x",
        ])
        .exits(2)
        .stdout_has("State: FAILED")
        .stdout_has("unknown capability");
}
