//! Configuration file specs

use crate::prelude::*;

#[test]
fn logs_go_to_the_state_directory() {
    let project = Project::empty();
    project.jr().args(&["list"]).passes();

    assert!(project.state_dir().join("jobrelay.log").exists());
    assert!(project.state_dir().join("jobs.wal").exists());
}

#[test]
fn state_dir_comes_from_config_file() {
    let project = Project::empty();
    project.file("jobrelay.toml", "state_dir = \"data\"\n");

    project.jr().args(&["list"]).passes();

    assert!(project.path().join("data/jobs.wal").exists());
    assert!(!project.state_dir().exists());
}

#[test]
fn state_dir_flag_overrides_config() {
    let project = Project::empty();
    project.file("jobrelay.toml", "state_dir = \"data\"\n");

    project
        .jr()
        .args(&["--state-dir", "other", "list"])
        .passes();

    assert!(project.path().join("other/jobs.wal").exists());
}

#[test]
fn invalid_config_is_reported() {
    let project = Project::empty();
    project.file("jobrelay.toml", "[executor]\ntimeout = \"whenever\"\n");

    project
        .jr()
        .args(&["list"])
        .fails()
        .stderr_has("Invalid config");
}

#[test]
fn explicit_missing_config_is_reported() {
    Project::empty()
        .jr()
        .args(&["--config", "missing.toml", "list"])
        .fails()
        .stderr_has("Cannot read config");
}

#[test]
fn executor_timeout_completes_long_jobs_unsuccessfully() {
    let project = Project::empty();
    project.file("jobrelay.toml", "[executor]\ntimeout = \"200ms\"\n");

    project
        .jr()
        .args(&["run", "--name", "slow", "--provider", "shell", "--payload", "sleep 30"])
        .exits(2)
        .stdout_has("State: COMPLETED")
        .stdout_has("Success: false")
        .stdout_has("timed out");
}
