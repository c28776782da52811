//! `jr run` specs

use crate::prelude::*;

#[test]
fn echo_job_completes_with_payload_as_result() {
    Project::empty()
        .jr()
        .args(&["run", "--name", "greet", "--provider", "echo", "--payload", "hello"])
        .passes()
        .stdout_has("Name: greet")
        .stdout_has("State: COMPLETED")
        .stdout_has("Success: true")
        .stdout_has("Result: hello");
}

#[test]
fn shell_job_captures_stdout() {
    Project::empty()
        .jr()
        .args(&[
            "run",
            "--name",
            "sh",
            "--provider",
            "shell",
            "--payload",
            "printf 'from shell'",
        ])
        .passes()
        .stdout_has("Result: from shell");
}

#[test]
fn nonzero_shell_exit_is_unsuccessful() {
    Project::empty()
        .jr()
        .args(&["run", "--name", "bad", "--provider", "shell", "--payload", "exit 4"])
        .exits(2)
        .stdout_has("State: COMPLETED")
        .stdout_has("Success: false");
}

#[test]
fn unknown_provider_completes_unsuccessfully() {
    Project::empty()
        .jr()
        .args(&["run", "--name", "x", "--provider", "com.example.Nope", "--payload", "p"])
        .exits(2)
        .stdout_has("State: COMPLETED")
        .stdout_has("Success: false")
        .stdout_has("unknown capability");
}

#[test]
fn unapproved_provider_completes_unsuccessfully() {
    let project = Project::empty();
    project.file("jobrelay.toml", "[capabilities]\nproviders = [\"echo\"]\n");

    project
        .jr()
        .args(&["run", "--name", "x", "--provider", "shell", "--payload", "true"])
        .exits(2)
        .stdout_has("not approved");
}

#[test]
fn json_output_has_job_fields() {
    let ran = Project::empty()
        .jr()
        .args(&[
            "-o",
            "json",
            "run",
            "--name",
            "greet",
            "--provider",
            "echo",
            "--payload",
            "hi",
            "--started-by",
            "key-42",
        ])
        .passes();

    let json = ran.json();
    assert_eq!(json["name"], "greet");
    assert_eq!(json["state"], "COMPLETED");
    assert_eq!(json["success"], true);
    assert_eq!(json["result"], "hi");
    assert_eq!(json["started_by"], "key-42");
    assert_eq!(json["id"], 1);
    assert!(json["started"].is_string());
    assert!(json["completed"].is_string());
}

#[test]
fn ids_increase_across_invocations() {
    let project = Project::empty();
    for _ in 0..2 {
        project
            .jr()
            .args(&["run", "--name", "n", "--provider", "echo", "--payload", "p"])
            .passes();
    }

    let ran = project
        .jr()
        .args(&["-o", "json", "run", "--name", "n", "--provider", "echo", "--payload", "p"])
        .passes();
    assert_eq!(ran.json()["id"], 3);
}
