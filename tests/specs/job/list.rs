//! `jr list` specs

use crate::prelude::*;

#[test]
fn empty_store_lists_nothing() {
    Project::empty()
        .jr()
        .args(&["list"])
        .passes()
        .stdout_has("No jobs");
}

#[test]
fn list_shows_jobs_in_creation_order() {
    let project = Project::empty();
    for name in ["first", "second"] {
        project
            .jr()
            .args(&["run", "--name", name, "--provider", "echo", "--payload", "p"])
            .passes();
    }

    let ran = project.jr().args(&["list"]).passes().stdout_has("UUID");
    let stdout = ran.stdout();
    let first = stdout.find("first").unwrap();
    let second = stdout.find("second").unwrap();
    assert!(first < second);
}

#[test]
fn list_json_is_an_array() {
    let project = Project::empty();
    project
        .jr()
        .args(&["run", "--name", "only", "--provider", "echo", "--payload", "p"])
        .passes();

    let json = project.jr().args(&["-o", "json", "list"]).passes().json();
    let jobs = json.as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["name"], "only");
}
