//! Error reporting and hints.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_not_installed_hints_init() {
    let t = Test::new();

    t.cmd()
        .args(["key", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not installed"))
        .stderr(predicate::str::contains("run: stymie init"));
}

#[test]
fn test_missing_identity_hints_cipher() {
    let t = Test::init();
    std::fs::remove_file(t.layout().age_identity()).unwrap();

    t.cmd()
        .args(["file", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid identity"))
        .stderr(predicate::str::contains("STYMIE_CIPHER"));
}

#[test]
fn test_unknown_cipher_rejected() {
    let t = Test::new();

    t.cmd()
        .args(["--cipher", "rot13", "key", "list"])
        .assert()
        .failure();
}

#[test]
fn test_errors_go_to_stderr_only() {
    let t = Test::init();

    let output = t.key_get("missing");
    assert_failure(&output);
    assert!(output.stdout.is_empty());
    assert_stderr_contains(&output, "no matching entry: missing");
}
