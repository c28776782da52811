//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .jr()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("capabilities");
}

#[test]
fn run_help_lists_job_flags() {
    Project::empty()
        .jr()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--provider")
        .stdout_has("--publisher")
        .stdout_has("--payload")
        .stdout_has("--started-by");
}

#[test]
fn version_flag_prints_version() {
    Project::empty()
        .jr()
        .args(&["--version"])
        .passes()
        .stdout_has("jr ");
}
