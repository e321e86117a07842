//! Encryption transport.
//!
//! Provides the encrypt/decrypt abstraction stymie depends on and its
//! implementations.
//!
//! ## Backends
//!
//! - **gpg**: Default. Shells out to the `gpg` CLI, so ciphertext is
//!   readable by any OpenPGP tool and by installations created before the
//!   age backend existed.
//! - **age**: In-process x25519 encryption with an identity file kept in
//!   the installation root. Cannot sign.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Add a `CipherKind` variant and wire it into `CipherBackend`

use std::io::Write;
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::fs;
use crate::error::Result;

mod age;
mod backend;
mod gpg;

pub use self::age::Age;
pub use backend::{CipherBackend, CipherKind};
pub use gpg::Gpg;

/// Per-write encryption options, taken from the installation config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptOptions<'a> {
    /// Key to encrypt for (GPG key id/email, or age public key)
    pub recipient: &'a str,
    /// ASCII-armor the ciphertext instead of writing binary
    pub armor: bool,
    /// Also sign with the user's private key
    pub sign: bool,
}

/// Encryption transport trait.
///
/// Implementations are treated as slow, external and failure-prone.
/// Their errors are opaque `CipherError` strings.
pub trait Cipher {
    /// Encrypt `plaintext` according to `options`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if the transport fails.
    fn encrypt(&self, plaintext: &[u8], options: &EncryptOptions<'_>) -> Result<Vec<u8>>;

    /// Decrypt the ciphertext file at `source`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the file cannot be
    /// decrypted with the available private key.
    fn decrypt(&self, source: &Path) -> Result<Zeroizing<Vec<u8>>>;

    /// Decrypt `source` straight into `sink`.
    ///
    /// The default buffers in zeroizing memory; backends that can stream
    /// override it.
    fn decrypt_to(&self, source: &Path, sink: &mut dyn Write) -> Result<()> {
        let plaintext = self.decrypt(source)?;
        sink.write_all(&plaintext)?;
        sink.flush()?;
        Ok(())
    }

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}

/// Encrypt `plaintext` and atomically replace `destination` with the
/// ciphertext (owner-only permissions).
///
/// On failure the previous ciphertext at `destination` is left untouched.
pub fn seal(
    cipher: &dyn Cipher,
    plaintext: &[u8],
    destination: &Path,
    options: &EncryptOptions<'_>,
) -> Result<()> {
    let ciphertext = cipher.encrypt(plaintext, options)?;
    fs::write_atomic(destination, &ciphertext)?;
    debug!(
        path = %destination.display(),
        cipher = cipher.name(),
        ciphertext_len = ciphertext.len(),
        "sealed"
    );
    Ok(())
}
