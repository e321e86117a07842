//! Test support utilities for stymie integration tests.
//!
//! Provides isolated installations and scripted collaborators.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fakes;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fakes::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use stymie::cli::init::{self, Options};
use stymie::cli::prompt::AssumeYes;
use stymie::core::cipher::{self, Age, Cipher, CipherKind};
use stymie::core::constants::ROOT_DIR;
use stymie::core::layout::Layout;
use stymie::core::session::Session;
use tempfile::TempDir;

/// Test environment with an isolated `$STYMIE` directory.
///
/// Child processes get `$STYMIE` and `$HOME` pointed at the temp dir, so
/// tests never touch the real installation and can run in parallel.
pub struct Test {
    /// Temporary `$STYMIE` (and `$HOME`) directory
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment installed through `stymie init --yes`.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to install: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create a test environment installed in-process with the age cipher.
    pub fn installed() -> Self {
        let t = Self::new();
        let options = Options {
            yes: true,
            ..Options::default()
        };
        init::install(&t.layout(), CipherKind::Age, options, &mut AssumeYes)
            .expect("failed to install");
        t
    }

    /// Create an installed environment holding the given credentials.
    pub fn with_entries(entries: &[(&str, &[(&str, &str)])]) -> Self {
        let t = Self::installed();
        let session = t.session();
        let store = session.store();
        for (key, fields) in entries {
            store.add(key, entry(fields)).expect("failed to add entry");
        }
        t
    }

    pub fn layout(&self) -> Layout {
        Layout::at(self.dir.path().join(ROOT_DIR))
    }

    pub fn root(&self) -> PathBuf {
        self.layout().root().to_path_buf()
    }

    /// Open the installation with the cipher it was installed with.
    pub fn session(&self) -> Session {
        Session::open_at(self.layout(), None).expect("failed to open session")
    }

    /// Raw ciphertext of the credential document.
    pub fn keys_ciphertext(&self) -> Vec<u8> {
        std::fs::read(self.layout().keys()).expect("failed to read credential document")
    }

    /// Raw ciphertext of the vault file for `key`.
    pub fn secret_ciphertext(&self, key: &str) -> Vec<u8> {
        let session = self.session();
        let address = session.config().address(key).expect("invalid key");
        std::fs::read(self.layout().secret(&address)).expect("failed to read vault file")
    }

    /// Encrypt `plaintext` verbatim as the vault file for `key`, bypassing
    /// the key header.
    pub fn plant_secret(&self, key: &str, plaintext: &[u8]) {
        let session = self.session();
        let age = Age::load(&self.layout().age_identity()).expect("failed to load identity");
        let address = session.config().address(key).expect("invalid key");
        cipher::seal(
            &age,
            plaintext,
            &self.layout().secret(&address),
            &session.config().encrypt_options(),
        )
        .expect("failed to seal");
    }

    /// Decrypt the vault file for `key` without interpreting it.
    pub fn secret_plaintext(&self, key: &str) -> Vec<u8> {
        let session = self.session();
        let age = Age::load(&self.layout().age_identity()).expect("failed to load identity");
        let address = session.config().address(key).expect("invalid key");
        age.decrypt(&self.layout().secret(&address))
            .expect("failed to decrypt")
            .to_vec()
    }

    /// Names of plaintext scratch files left in the root.
    pub fn scratch_files(&self) -> Vec<String> {
        std::fs::read_dir(self.root())
            .expect("failed to read root")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.starts_with(stymie::core::constants::SCRATCH_PREFIX))
            .collect()
    }
}
