//! `jr show` specs

use crate::prelude::*;

fn run_job(project: &Project) -> String {
    let ran = project
        .jr()
        .args(&["-o", "json", "run", "--name", "kept", "--provider", "echo", "--payload", "p"])
        .passes();
    ran.json()["uuid"].as_str().unwrap().to_string()
}

#[test]
fn show_finds_job_by_full_uuid() {
    let project = Project::empty();
    let uuid = run_job(&project);

    project
        .jr()
        .args(&["show", &uuid])
        .passes()
        .stdout_has(&format!("Job: {uuid}"))
        .stdout_has("Name: kept");
}

#[test]
fn show_finds_job_by_prefix() {
    let project = Project::empty();
    let uuid = run_job(&project);

    project
        .jr()
        .args(&["show", &uuid[..8]])
        .passes()
        .stdout_has(&format!("Job: {uuid}"));
}

#[test]
fn show_unknown_job_suggests_list() {
    Project::empty()
        .jr()
        .args(&["show", "does-not-exist"])
        .fails()
        .stderr_has("Job 'does-not-exist' not found")
        .stderr_has("jr list");
}
