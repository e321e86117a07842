//! Content-addressed secret vault.
//!
//! Each secret is one encrypted file under `<root>/s/`, named by the digest
//! of its key. Key names never appear on disk in the clear; the plaintext
//! carries a key header (see [`header`]) so address collisions are caught.

mod edit;
pub mod header;

use std::io::Write;

use tracing::{debug, info};

use crate::core::cipher::{self, Cipher};
use crate::core::config::Config;
use crate::core::domain::Confirmed;
use crate::core::fs::{self, Erasure};
use crate::core::layout::Layout;
use crate::core::lock::LockMode;
use crate::core::prompt::Prompt;
use crate::core::types::Address;
use crate::error::{Result, SecretError};

use self::header::Verified;

/// Handle on the vault of one installation.
pub struct Vault<'a> {
    layout: &'a Layout,
    config: &'a Config,
    cipher: &'a dyn Cipher,
}

impl std::fmt::Debug for Vault<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("path", &self.layout.secrets())
            .field("cipher", &self.cipher.name())
            .finish()
    }
}

impl<'a> Vault<'a> {
    pub fn new(layout: &'a Layout, config: &'a Config, cipher: &'a dyn Cipher) -> Self {
        Self {
            layout,
            config,
            cipher,
        }
    }

    /// Encrypt `content` into a new vault file for `key`.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::AlreadyExists` if `key` already has a file;
    /// the existing file is not touched.
    pub fn create(&self, key: &str, content: &[u8]) -> Result<()> {
        let address = self.config.address(key)?;
        let _lock = self.layout.lock_secrets(LockMode::Exclusive)?;

        let path = self.layout.secret(&address);
        if path.exists() {
            return Err(SecretError::AlreadyExists(key.to_string()).into());
        }

        let plaintext = header::frame(key, content)?;
        cipher::seal(self.cipher, &plaintext, &path, &self.config.encrypt_options())?;

        info!(address = %address, content_len = content.len(), "vault file created");
        Ok(())
    }

    /// Whether `key` has a vault file. Never decrypts.
    pub fn exists(&self, key: &str) -> Result<bool> {
        let address = self.config.address(key)?;
        Ok(self.layout.secret(&address).is_file())
    }

    /// Decrypt `key` and stream its content into `sink`.
    ///
    /// Plaintext never touches disk.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if `key` has no file and
    /// `SecretError::AddressCollision` if the file belongs to another key
    /// (in which case nothing is written to `sink`).
    pub fn read_to(&self, key: &str, sink: &mut dyn Write) -> Result<()> {
        let address = self.config.address(key)?;
        let _lock = self.layout.lock_secrets(LockMode::Shared)?;

        let path = self.layout.secret(&address);
        if !path.is_file() {
            return Err(SecretError::NotFound(key.to_string()).into());
        }

        let mut verified = Verified::new(key, sink);
        self.cipher.decrypt_to(&path, &mut verified)?;
        verified.finish()?;

        debug!(address = %address, "vault file read");
        Ok(())
    }

    /// Securely delete `key`'s file after confirmation.
    ///
    /// On decline nothing is touched. The returned [`Erasure`] says whether
    /// `shred` was used or the in-process fallback.
    pub fn remove(&self, key: &str, prompt: &mut dyn Prompt) -> Result<Confirmed<Erasure>> {
        let address = self.config.address(key)?;
        let _lock = self.layout.lock_secrets(LockMode::Exclusive)?;

        let path = self.layout.secret(&address);
        if !path.is_file() {
            return Err(SecretError::NotFound(key.to_string()).into());
        }
        if !prompt.confirm("Are you sure?", false)? {
            debug!("removal declined");
            return Ok(Confirmed::Declined);
        }

        let erasure = fs::secure_delete(&path)?;
        info!(address = %address, ?erasure, "vault file removed");
        Ok(Confirmed::Done(erasure))
    }

    /// Addresses of every stored vault file, sorted.
    ///
    /// Key names cannot be listed: addresses are one-way digests.
    pub fn addresses(&self) -> Result<Vec<Address>> {
        let _lock = self.layout.lock_secrets(LockMode::Shared)?;

        let mut addresses = Vec::new();
        for entry in std::fs::read_dir(self.layout.secrets())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_hexdigit()) {
                addresses.push(name);
            }
        }
        addresses.sort();
        Ok(addresses)
    }
}
