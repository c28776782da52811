//! `jr capabilities` specs

use crate::prelude::*;

#[test]
fn builtins_are_listed_and_approved() {
    Project::empty()
        .jr()
        .args(&["capabilities"])
        .passes()
        .stdout_has("echo")
        .stdout_has("shell")
        .stdout_has("log")
        .stdout_has("file")
        .stdout_lacks(" no");
}

#[test]
fn allowlist_marks_other_keys_unapproved() {
    let project = Project::empty();
    project.file("jobrelay.toml", "[capabilities]\npublishers = [\"log\"]\n");

    let json = project
        .jr()
        .args(&["-o", "json", "capabilities"])
        .passes()
        .json();
    let file = json
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["key"] == "file")
        .unwrap()
        .clone();
    assert_eq!(file["kind"], "publisher");
    assert_eq!(file["approved"], false);
}
