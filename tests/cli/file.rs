//! Tests for `stymie file` commands.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_add_from_stdin_then_get() {
    let t = Test::init();

    let output = t.file_add("notes", BINARY_CONTENT);
    assert_success(&output);
    assert_stderr_contains(&output, "File created successfully");

    let output = t.file_get("notes");
    assert_success(&output);
    assert_eq!(output.stdout, BINARY_CONTENT);
}

#[test]
fn test_add_reads_file_named_after_key() {
    let t = Test::init();
    std::fs::write(t.dir.path().join("id_rsa"), b"-----BEGIN KEY-----\n").unwrap();

    t.cmd().args(["file", "add", "id_rsa"]).assert().success();

    let output = t.file_get("id_rsa");
    assert_eq!(output.stdout, b"-----BEGIN KEY-----\n");
}

#[test]
fn test_add_existing_fails() {
    let t = Test::init();
    assert_success(&t.file_add("notes", b"first"));

    let output = t.file_add("notes", b"second");
    assert_failure(&output);
    assert_stderr_contains(&output, "file already exists");

    assert_eq!(t.file_get("notes").stdout, b"first");
}

#[test]
fn test_has_list_rm() {
    let t = Test::init();
    assert_success(&t.file_add("notes", b"body"));

    t.cmd()
        .args(["file", "has", "notes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("File exists"));

    let address = t.session().config().address("notes").unwrap();
    t.cmd()
        .args(["file", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", address)));

    t.cmd()
        .args(["file", "rm", "notes", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("The file has been removed"));

    t.cmd()
        .args(["file", "has", "notes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No matching entry"));
    t.cmd()
        .args(["file", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No stored files"));
}

#[test]
fn test_get_missing_fails() {
    let t = Test::init();

    let output = t.file_get("missing");
    assert_failure(&output);
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
fn editor_script(t: &Test, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = t.dir.path().join("fake-editor");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
#[cfg(unix)]
fn test_edit_with_editor() {
    let t = Test::init();
    assert_success(&t.file_add("notes", b"draft\n"));
    let editor = editor_script(&t, "printf 'final\\n' > \"$1\"");

    t.cmd()
        .args(["file", "edit", "notes"])
        .env("EDITOR", &editor)
        .assert()
        .success()
        .stderr(predicate::str::contains("Re-encrypted and closed the file"));

    assert_eq!(t.file_get("notes").stdout, b"final\n");
    assert!(t.scratch_files().is_empty());
}

#[test]
#[cfg(unix)]
fn test_edit_unchanged() {
    let t = Test::init();
    assert_success(&t.file_add("notes", b"draft\n"));
    let before = t.secret_ciphertext("notes");
    let editor = editor_script(&t, "exit 0");

    t.cmd()
        .args(["file", "edit", "notes"])
        .env("VISUAL", &editor)
        .assert()
        .success()
        .stderr(predicate::str::contains("No change"));

    assert_eq!(t.secret_ciphertext("notes"), before);
}

#[test]
#[cfg(unix)]
fn test_edit_editor_failure() {
    let t = Test::init();
    assert_success(&t.file_add("notes", b"draft\n"));
    let before = t.secret_ciphertext("notes");
    let editor = editor_script(&t, "echo junk > \"$1\"; exit 3");

    t.cmd()
        .args(["file", "edit", "notes"])
        .env("EDITOR", &editor)
        .assert()
        .failure()
        .stderr(predicate::str::contains("editor failed"));

    assert_eq!(t.secret_ciphertext("notes"), before);
    assert!(t.scratch_files().is_empty());
}
