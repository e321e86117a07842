//! Credential CRUD operations.

use tracing::info;
use zeroize::Zeroizing;

use super::KeyStore;
use crate::core::domain::{Confirmed, Entry, Listing, Step};
use crate::core::prompt::Prompt;
use crate::error::{Result, SecretError};

impl KeyStore<'_> {
    /// Add a credential.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::InvalidKey` for a blank key and
    /// `SecretError::DuplicateKey` if the key is already stored.
    pub fn add(&self, key: &str, entry: Entry) -> Result<()> {
        if key.trim().is_empty() {
            return Err(SecretError::InvalidKey("key cannot be empty".to_string()).into());
        }

        self.transact(|doc| {
            if doc.contains(key) {
                return Err(SecretError::DuplicateKey(key.to_string()).into());
            }
            doc.insert(key.to_string(), entry);
            Ok(Step::Commit(()))
        })?;

        info!(key = %key, "entry created");
        Ok(())
    }

    /// Fetch a whole entry.
    pub fn get(&self, key: &str) -> Result<Entry> {
        self.read(|doc| {
            doc.get(key)
                .cloned()
                .ok_or_else(|| SecretError::NotFound(key.to_string()).into())
        })
    }

    /// Fetch one field of an entry.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` for an unknown key and
    /// `SecretError::FieldNotFound` for an unknown field.
    pub fn field(&self, key: &str, field: &str) -> Result<Zeroizing<String>> {
        self.read(|doc| {
            let entry = doc
                .get(key)
                .ok_or_else(|| SecretError::NotFound(key.to_string()))?;
            entry
                .get(field)
                .map(|v| Zeroizing::new(v.to_string()))
                .ok_or_else(|| {
                    SecretError::FieldNotFound {
                        key: key.to_string(),
                        field: field.to_string(),
                    }
                    .into()
                })
        })
    }

    pub fn has(&self, key: &str) -> Result<bool> {
        self.read(|doc| Ok(doc.contains(key)))
    }

    pub fn list(&self) -> Result<Listing> {
        self.read(|doc| Ok(Listing::from_keys(doc.keys())))
    }

    /// Remove a credential after confirmation.
    ///
    /// A declined confirmation leaves the ciphertext untouched.
    pub fn remove(&self, key: &str, prompt: &mut dyn Prompt) -> Result<Confirmed<()>> {
        let outcome = self.transact(|doc| {
            if !doc.contains(key) {
                return Err(SecretError::NotFound(key.to_string()).into());
            }
            if !prompt.confirm("Are you sure?", false)? {
                return Ok(Step::Abort(Confirmed::Declined));
            }
            doc.remove(key);
            Ok(Step::Commit(Confirmed::Done(())))
        })?;

        if outcome == Confirmed::Done(()) {
            info!(key = %key, "entry removed");
        }
        Ok(outcome)
    }
}
