//! Interactive credential editing.

use tracing::{debug, info};
use zeroize::Zeroizing;

use super::KeyStore;
use crate::core::domain::{Edited, Step};
use crate::core::prompt::{any, no_blanks, Prompt};
use crate::error::{Result, SecretError};

impl KeyStore<'_> {
    /// Walk the user through an entry, defaulting every answer to the
    /// current value.
    ///
    /// Renaming the key counts as a change. The document is re-encrypted
    /// only when something changed.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if `key` is not stored.
    pub fn edit(&self, key: &str, prompt: &mut dyn Prompt) -> Result<Edited> {
        let outcome = self.transact(|doc| {
            let mut entry = doc
                .get(key)
                .cloned()
                .ok_or_else(|| SecretError::NotFound(key.to_string()))?;

            let renamed = prompt.input("Edit key:", Some(key), &|input| {
                no_blanks(input)?;
                if input != key && doc.contains(input) {
                    return Err("Key already exists".to_string());
                }
                Ok(())
            })?;

            let mut changed = renamed != key;
            for name in entry.names() {
                let current = Zeroizing::new(entry.get(&name).unwrap_or_default().to_string());
                let answer =
                    prompt.input(&format!("Edit {}:", name), Some(current.as_str()), &any)?;
                changed |= entry.set(&name, answer);
            }

            if !changed {
                return Ok(Step::Abort(Edited::Unchanged));
            }

            if renamed != key {
                debug!("key renamed");
                doc.remove(key);
            }
            doc.insert(renamed.clone(), entry);
            Ok(Step::Commit(Edited::Updated { key: renamed }))
        })?;

        if let Edited::Updated { key } = &outcome {
            info!(key = %key, "entry updated");
        }
        Ok(outcome)
    }
}
