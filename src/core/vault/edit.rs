//! Editing vault files in an external editor.

use tracing::{debug, info};

use super::{header, Vault};
use crate::core::cipher;
use crate::core::domain::Edited;
use crate::core::editor::Editor;
use crate::core::lock::LockMode;
use crate::error::{Result, SecretError};

impl Vault<'_> {
    /// Decrypt `key` into a scratch file, let the user edit it, and
    /// re-encrypt if the content changed.
    ///
    /// The scratch file is erased on every path. If the editor fails,
    /// nothing is re-encrypted. Files without a key header gain one when
    /// their content changes.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if `key` has no file,
    /// `SecretError::AddressCollision` if the file belongs to another key
    /// and `Error::Editor` if the editor fails.
    pub fn edit(&self, key: &str, editor: &dyn Editor) -> Result<Edited> {
        let address = self.config.address(key)?;
        let _lock = self.layout.lock_secrets(LockMode::Exclusive)?;

        let path = self.layout.secret(&address);
        if !path.is_file() {
            return Err(SecretError::NotFound(key.to_string()).into());
        }

        let plaintext = self.cipher.decrypt(&path)?;
        let (content, had_header) = header::split(key, &plaintext)?;

        let scratch = self.layout.scratch_file()?;
        scratch.write(content)?;
        editor.edit(scratch.path())?;
        let edited = scratch.read()?;

        if edited.as_slice() == content {
            debug!(legacy = !had_header, "content unchanged");
            return Ok(Edited::Unchanged);
        }

        let framed = header::frame(key, &edited)?;
        cipher::seal(self.cipher, &framed, &path, &self.config.encrypt_options())?;

        info!(address = %address, "vault file updated");
        Ok(Edited::Updated {
            key: key.to_string(),
        })
    }
}
