//! Offline contract tests for the `snipgen` binary: configuration and
//! diagnostics only, no network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn snipgen() -> Command {
    let mut cmd = Command::cargo_bin("snipgen").expect("binary builds");
    cmd.env_remove("SNIPGEN_VECTORS_PATH")
        .env_remove("SNIPGEN_THESAURUS_PATH")
        .env_remove("SNIPGEN_SEARXNG_ENDPOINT")
        .env_remove("SNIPGEN_SEARXNG_ENDPOINTS");
    cmd
}

fn vectors_fixture() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("tmp");
    write!(f, "2 3\npython 1.0 0.0 0.0\ntutorial 0.9 0.1 0.0\n").unwrap();
    f
}

#[test]
fn help_describes_the_tool() {
    snipgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("snippets"));
}

#[test]
fn missing_vectors_flag_is_a_usage_error() {
    snipgen()
        .args(["--query", "python tutorial"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--vectors"));
}

#[test]
fn blank_query_is_rejected_before_any_io() {
    let vectors = vectors_fixture();
    snipgen()
        .args(["--query", "   "])
        .args(["--vectors", vectors.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid query"));
}

#[test]
fn unreadable_vectors_path_fails_with_a_diagnostic() {
    snipgen()
        .args(["--query", "python tutorial"])
        .args(["--vectors", "/nonexistent/vectors.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vectors"));
}

#[test]
fn missing_search_endpoint_fails_before_any_fetch() {
    let vectors = vectors_fixture();
    snipgen()
        .args(["--query", "python tutorial"])
        .args(["--vectors", vectors.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SNIPGEN_SEARXNG_ENDPOINT"));
}
