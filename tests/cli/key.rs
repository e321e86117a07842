//! Tests for `stymie key` commands.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_add_with_flags_then_get() {
    let t = Test::init();

    let output = t.key_add("example.com", "https://example.com", "alice", "hunter2");
    assert_success(&output);
    assert_stderr_contains(&output, "Entry created successfully");

    let output = t.key_get("example.com");
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "url: https://example.com\nusername: alice\npassword: hunter2\n"
    );
}

#[test]
fn test_add_extra_fields() {
    let t = Test::init();

    t.cmd()
        .args([
            "key", "add", "bank", "--url", "u", "--username", "n", "--password", "p", "--field",
            "pin=12=34",
        ])
        .assert()
        .success();

    let output = t.key_field("bank", "pin");
    assert_success(&output);
    assert_eq!(stdout(&output), "12=34");
}

#[test]
fn test_add_duplicate_fails() {
    let t = Test::init();
    assert_success(&t.key_add("example.com", "u", "n", "p"));

    let output = t.key_add("example.com", "u2", "n2", "p2");
    assert_failure(&output);
    assert_stderr_contains(&output, "key already exists");
}

#[test]
fn test_field_is_raw_without_newline() {
    let t = Test::init();
    assert_success(&t.key_add("example.com", "u", "alice", "pass word"));

    let output = t.key_field("example.com", "password");
    assert_success(&output);
    assert_eq!(output.stdout, b"pass word");
}

#[test]
fn test_strip_removes_whitespace() {
    let t = Test::init();
    assert_success(&t.key_add("example.com", "u", "alice", " pass \t word "));

    t.cmd()
        .args(["key", "get", "example.com", "-f", "password", "-s"])
        .assert()
        .success()
        .stdout("password");
}

#[test]
fn test_unknown_field_fails() {
    let t = Test::init();
    assert_success(&t.key_add("example.com", "u", "alice", "p"));

    let output = t.key_field("example.com", "pin");
    assert_failure(&output);
    assert_stderr_contains(&output, "no field 'pin'");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_list_one_key_per_line() {
    let t = Test::init();

    let output = t.key_list();
    assert_success(&output);
    assert!(output.stdout.is_empty());
    assert_stderr_contains(&output, "No installed keys");

    assert_success(&t.key_add("b.example", "u", "n", "p"));
    assert_success(&t.key_add("a.example", "u", "n", "p"));

    let output = t.key_list();
    assert_eq!(stdout(&output), "a.example\nb.example\n");
}

#[test]
fn test_has() {
    let t = Test::init();
    assert_success(&t.key_add("example.com", "u", "n", "p"));

    t.cmd()
        .args(["key", "has", "example.com"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Key exists"));
    t.cmd()
        .args(["key", "has", "other"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No matching key"));
}

#[test]
fn test_rm_yes() {
    let t = Test::init();
    assert_success(&t.key_add("example.com", "u", "n", "p"));

    t.cmd()
        .args(["key", "rm", "example.com", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("example.com has been removed"));

    let output = t.key_get("example.com");
    assert_failure(&output);
    assert_stderr_contains(&output, "no matching entry");
}

#[test]
fn test_generate_needs_no_install() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["key", "generate", "--words", "5"])
        .output()
        .unwrap();
    assert_success(&output);
    let phrase = stdout(&output);
    assert_eq!(phrase.trim_end().split(' ').count(), 5);
    assert!(!t.root().exists());
}
