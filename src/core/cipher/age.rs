//! Age encryption backend implementation.
//!
//! Provides encryption/decryption using the age format with x25519 keys,
//! either ASCII-armored or binary. The identity lives in the installation
//! root in the same text format `age-keygen` writes.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use ::age::secrecy::ExposeSecret;
use ::age::x25519;
use tracing::{trace, warn};
use zeroize::Zeroizing;

use super::{Cipher, EncryptOptions};
use crate::core::fs;
use crate::error::{CipherError, Result};

/// Age-based cipher holding the installation's x25519 identity.
pub struct Age {
    identity: x25519::Identity,
}

impl Age {
    /// Generate a fresh identity.
    pub fn generate() -> Self {
        Self {
            identity: x25519::Identity::generate(),
        }
    }

    /// Load an identity file.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidIdentity` if the file is missing or
    /// holds no parseable secret key.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map(Zeroizing::new).map_err(|e| {
            CipherError::InvalidIdentity(format!("{}: {}", path.display(), e))
        })?;

        let line = contents
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#'))
            .ok_or_else(|| {
                CipherError::InvalidIdentity(format!("{}: no secret key", path.display()))
            })?;

        let identity = line.parse::<x25519::Identity>().map_err(|e| {
            CipherError::InvalidIdentity(format!("{}: {}", path.display(), e))
        })?;

        trace!(path = %path.display(), "loaded age identity");
        Ok(Self { identity })
    }

    /// Write the identity to `path` with owner-only permissions.
    pub fn save(&self, path: &Path) -> Result<()> {
        let secret = self.identity.to_string();
        let contents = Zeroizing::new(format!(
            "# created: {}\n# public key: {}\n{}\n",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.recipient(),
            secret.expose_secret()
        ));
        fs::write_private(path, contents.as_bytes())?;
        Ok(())
    }

    /// Public key to use as the config recipient.
    pub fn recipient(&self) -> String {
        self.identity.to_public().to_string()
    }
}

impl std::fmt::Debug for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Age")
            .field("recipient", &self.recipient())
            .finish_non_exhaustive()
    }
}

/// Parse a public key string into an age recipient
///
/// # Errors
///
/// Returns `CipherError::InvalidRecipient` if the key format is invalid.
pub fn parse_recipient(key: &str) -> Result<x25519::Recipient> {
    key.trim()
        .parse::<x25519::Recipient>()
        .map_err(|_| CipherError::InvalidRecipient(key.to_string()).into())
}

impl Cipher for Age {
    fn name(&self) -> &'static str {
        "age"
    }

    fn encrypt(&self, plaintext: &[u8], options: &EncryptOptions<'_>) -> Result<Vec<u8>> {
        trace!(
            plaintext_len = plaintext.len(),
            armor = options.armor,
            "encrypting"
        );
        if options.sign {
            warn!("age cannot sign; writing an unsigned ciphertext");
        }

        let recipient = parse_recipient(options.recipient)?;
        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let format = if options.armor {
            age::armor::Format::AsciiArmor
        } else {
            age::armor::Format::Binary
        };

        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(age::armor::ArmoredWriter::wrap_output(
                &mut encrypted,
                format,
            )?)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        writer.write_all(plaintext)?;
        let armored = writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        armored
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("armor: {}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");
        Ok(encrypted)
    }

    fn decrypt(&self, source: &Path) -> Result<Zeroizing<Vec<u8>>> {
        let mut plaintext = Zeroizing::new(Vec::new());
        self.decrypt_to(source, &mut *plaintext)?;
        Ok(plaintext)
    }

    fn decrypt_to(&self, source: &Path, sink: &mut dyn Write) -> Result<()> {
        trace!(path = %source.display(), "decrypting");

        let file = File::open(source).map_err(|e| {
            CipherError::DecryptionFailed(format!("{}: {}", source.display(), e))
        })?;
        let reader = age::armor::ArmoredReader::new(BufReader::new(file));
        let decryptor = age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut reader = decryptor
            .decrypt(std::iter::once(&self.identity as &dyn age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut buf = Zeroizing::new([0u8; 8192]);
        let mut total = 0usize;
        loop {
            let n = reader
                .read(&mut buf[..])
                .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;
            if n == 0 {
                break;
            }
            sink.write_all(&buf[..n])?;
            total += n;
        }
        sink.flush()?;

        trace!(plaintext_len = total, "decrypted");
        Ok(())
    }
}
