//! Tests for `stymie init`.

use crate::support::*;
use predicates::prelude::*;
use stymie::core::layout::Layout;

#[test]
fn test_init_yes_installs() {
    let t = Test::new();

    t.cmd()
        .args(["init", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Installed"))
        .stdout(predicate::str::is_empty());

    assert!(t.layout().is_installed());
    assert!(t.layout().keys().is_file());
    assert!(t.layout().age_identity().is_file());
}

#[test]
fn test_init_twice_fails_with_hint() {
    let t = Test::init();

    t.cmd()
        .args(["init", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already installed"))
        .stderr(predicate::str::contains("remove the existing directory"));
}

#[test]
fn test_init_armor_and_digest_flags() {
    let t = Test::new();

    t.cmd()
        .args(["init", "--yes", "--armor", "--digest", "sha512"])
        .assert()
        .success();

    let session = t.session();
    assert!(session.config().armor);
    assert_eq!(session.config().address("x").unwrap().len(), 128);
}

#[test]
fn test_init_rejects_unknown_digest() {
    let t = Test::new();

    t.cmd()
        .args(["init", "--yes", "--digest", "md5"])
        .assert()
        .failure();

    assert!(!t.root().exists());
}

#[test]
fn test_init_appends_histignore() {
    let t = Test::new();

    t.cmd()
        .args(["init", "--yes", "--histignore", ".bashrc"])
        .assert()
        .success()
        .stderr(predicate::str::contains("HISTIGNORE"));

    let rc = std::fs::read_to_string(t.dir.path().join(".bashrc")).unwrap();
    assert!(rc.contains("HISTIGNORE=\"stymie *"));
}

#[test]
fn test_init_dir_elsewhere_exports_stymie() {
    let t = Test::new();

    t.cmd()
        .args(["init", "--yes", "--dir", "~/vaults"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated $STYMIE"));

    let base = t.dir.path().join("vaults");
    assert!(Layout::in_base(&base).is_installed());
    assert!(!t.root().exists());

    let rc = std::fs::read_to_string(t.dir.path().join(".bashrc")).unwrap();
    assert!(rc.contains(&format!("export STYMIE=\"{}\"", base.display())));

    t.cmd()
        .env("STYMIE", &base)
        .args(["key", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No installed keys"));
}

#[test]
fn test_init_env_file_flag() {
    let t = Test::new();
    let base = t.dir.path().join("vaults");

    t.cmd()
        .args(["init", "--yes", "--env-file", ".zshrc", "--dir"])
        .arg(&base)
        .assert()
        .success();

    let rc = std::fs::read_to_string(t.dir.path().join(".zshrc")).unwrap();
    assert!(rc.contains("export STYMIE="));
    assert!(!t.dir.path().join(".bashrc").exists());
}

#[test]
fn test_init_default_dir_needs_no_export() {
    let t = Test::new();

    t.cmd()
        .args(["init", "--yes", "--dir"])
        .arg(t.dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("$STYMIE").not());

    assert!(t.layout().is_installed());
    assert!(!t.dir.path().join(".bashrc").exists());
}

#[test]
fn test_commands_detect_installed_cipher() {
    let t = Test::new();

    t.cmd()
        .env_remove("STYMIE_CIPHER")
        .args(["--cipher", "age", "init", "--yes"])
        .assert()
        .success();

    t.cmd()
        .env_remove("STYMIE_CIPHER")
        .args(["key", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No installed keys"));

    t.cmd()
        .env_remove("STYMIE_CIPHER")
        .args(["file", "add", "notes", "--from", "-"])
        .write_stdin("body")
        .assert()
        .success();
}

#[test]
fn test_cipher_flag_overrides_detection() {
    let t = Test::init();

    t.cmd()
        .env_remove("STYMIE_CIPHER")
        .args(["--cipher", "gpg", "key", "list"])
        .assert()
        .failure();
}
