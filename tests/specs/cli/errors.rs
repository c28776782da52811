//! Error reporting specs

use crate::prelude::*;

#[test]
fn missing_required_flag_is_a_usage_error() {
    Project::empty()
        .jr()
        .args(&["run", "--name", "x"])
        .exits(2)
        .stderr_has("--provider");
}

#[test]
fn run_without_payload_explains_what_is_missing() {
    Project::empty()
        .jr()
        .args(&["run", "--name", "x", "--provider", "echo"])
        .fails()
        .stderr_has("error: Job cannot run without a payload")
        .stderr_has("suggestions:");
}

#[test]
fn run_without_payload_stores_nothing() {
    let project = Project::empty();
    project
        .jr()
        .args(&["run", "--name", "x", "--provider", "echo"])
        .fails();

    project.jr().args(&["list"]).passes().stdout_has("No jobs");
}
