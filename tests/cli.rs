//! Smoke tests for the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_single_prompt_flags() {
    Command::cargo_bin("proposta")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--prompt"))
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--endpoint"));
}

#[test]
fn version_matches_manifest() {
    Command::cargo_bin("proposta")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
