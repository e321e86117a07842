//! Credential document store.
//!
//! All credentials live in one encrypted JSON document (`<root>/k`). Every
//! operation is a transaction:
//!
//! ```text
//! lock → decrypt → deserialize → operate → [serialize → encrypt → replace]
//! ```
//!
//! Reads hold a shared lock, mutations an exclusive one. A mutation that
//! decides not to persist returns [`Step::Abort`] and the ciphertext is
//! left byte-identical.

mod edit;
mod entries;

use tracing::debug;

use crate::core::cipher::{self, Cipher};
use crate::core::config::Config;
use crate::core::domain::{Document, Step};
use crate::core::layout::Layout;
use crate::core::lock::LockMode;
use crate::error::{ConfigError, Result};

/// Handle on the credential document of one installation.
pub struct KeyStore<'a> {
    layout: &'a Layout,
    config: &'a Config,
    cipher: &'a dyn Cipher,
}

impl std::fmt::Debug for KeyStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("path", &self.layout.keys())
            .field("cipher", &self.cipher.name())
            .finish()
    }
}

impl<'a> KeyStore<'a> {
    pub fn new(layout: &'a Layout, config: &'a Config, cipher: &'a dyn Cipher) -> Self {
        Self {
            layout,
            config,
            cipher,
        }
    }

    /// Run `op` against a snapshot of the document under a shared lock.
    pub fn read<T>(&self, op: impl FnOnce(&Document) -> Result<T>) -> Result<T> {
        let _lock = self.layout.lock_keys(LockMode::Shared)?;
        let doc = self.load()?;
        op(&doc)
    }

    /// Run a decrypt → mutate → persist transaction under an exclusive lock.
    ///
    /// The document is re-encrypted only when `op` returns `Step::Commit`.
    pub fn transact<T>(&self, op: impl FnOnce(&mut Document) -> Result<Step<T>>) -> Result<T> {
        let _lock = self.layout.lock_keys(LockMode::Exclusive)?;
        let mut doc = self.load()?;

        match op(&mut doc)? {
            Step::Commit(value) => {
                self.persist(&doc)?;
                Ok(value)
            }
            Step::Abort(value) => {
                debug!("transaction aborted, document untouched");
                Ok(value)
            }
        }
    }

    fn load(&self) -> Result<Document> {
        let path = self.layout.keys();
        if !path.is_file() {
            return Err(ConfigError::Unavailable {
                path,
                reason: "credential document not found".to_string(),
            }
            .into());
        }
        let plaintext = self.cipher.decrypt(&path)?;
        let doc = Document::from_json(&plaintext)?;
        debug!(entries = doc.len(), "document decrypted");
        Ok(doc)
    }

    fn persist(&self, doc: &Document) -> Result<()> {
        let plaintext = doc.to_json()?;
        cipher::seal(
            self.cipher,
            &plaintext,
            &self.layout.keys(),
            &self.config.encrypt_options(),
        )?;
        debug!(entries = doc.len(), "document persisted");
        Ok(())
    }
}
