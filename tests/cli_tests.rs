//! CLI integration tests using the real fedmap binary

mod common;

use common::fedmap_cmd;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    fedmap_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import map"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_version_output() {
    fedmap_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fedmap"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_missing_subcommand_fails() {
    fedmap_cmd().assert().failure();
}

#[test]
fn test_completions_bash() {
    fedmap_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fedmap"));
}

#[test]
fn test_completions_unknown_shell() {
    fedmap_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Unsupported shell: tcsh"));
}

#[test]
fn test_init_help_lists_out_option() {
    fedmap_cmd()
        .args(["init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--out"))
        .stdout(predicate::str::contains("--strict"));
}
