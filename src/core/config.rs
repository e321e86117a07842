//! Installation configuration.
//!
//! Settings are written once by `stymie init` into the encrypted `c` file
//! and loaded once per process. Vault and store borrow the loaded value.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::address::{self, Digest};
use crate::core::cipher::{Cipher, CipherBackend, CipherKind, EncryptOptions};
use crate::core::codec;
use crate::core::layout::Layout;
use crate::core::types::{Address, Recipient};
use crate::error::{CipherError, ConfigError, Error, Result};

/// Installation settings, immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// ASCII-armor ciphertext
    pub armor: bool,
    /// Digest naming vault files
    pub hash: Digest,
    /// Key every file is encrypted for
    pub recipient: Recipient,
    /// Sign ciphertext with the user's private key
    pub sign: bool,
}

/// On-disk shape, with every field optional so absence can be reported
/// by name instead of as a parse error.
#[derive(Debug, Deserialize)]
struct RawConfig {
    armor: Option<bool>,
    #[serde(alias = "digest", alias = "digestAlgorithm")]
    hash: Option<String>,
    recipient: Option<String>,
    sign: Option<bool>,
}

impl RawConfig {
    fn validate(self) -> Result<Config> {
        let armor = self.armor.ok_or(ConfigError::MissingField { field: "armor" })?;
        let hash = self.hash.ok_or(ConfigError::MissingField { field: "hash" })?;
        let recipient = self
            .recipient
            .filter(|r| !r.trim().is_empty())
            .ok_or(ConfigError::MissingField { field: "recipient" })?;
        let sign = self.sign.ok_or(ConfigError::MissingField { field: "sign" })?;

        Ok(Config {
            armor,
            hash: hash.parse()?,
            recipient,
            sign,
        })
    }
}

impl Config {
    pub fn new(recipient: Recipient, armor: bool, sign: bool, hash: Digest) -> Self {
        Self {
            armor,
            hash,
            recipient,
            sign,
        }
    }

    /// Decrypt and validate `<root>/c`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Unavailable` if the file is missing or cannot
    /// be decrypted or parsed, `ConfigError::MissingField` if a setting is
    /// absent and `ConfigError::UnsupportedDigest` for an unknown digest.
    pub fn load(layout: &Layout, cipher: &CipherBackend) -> Result<Self> {
        let path = layout.config();
        debug!(path = %path.display(), "loading config");

        let unavailable = |reason: String| ConfigError::Unavailable {
            path: path.clone(),
            reason,
        };

        if !path.is_file() {
            return Err(unavailable("not found".to_string()).into());
        }

        let plaintext = cipher.decrypt(&path).map_err(|e| match e {
            Error::Cipher(CipherError::Unavailable(_)) => e,
            other => unavailable(other.to_string()).into(),
        })?;
        let config = Self::from_json(&plaintext).map_err(|e| match e {
            Error::Json(e) => unavailable(e.to_string()).into(),
            other => other,
        })?;

        if cipher.kind() == CipherKind::Age && config.sign {
            warn!("config requests signing, which the age cipher does not support");
        }

        debug!(hash = %config.hash, armor = config.armor, sign = config.sign, "config loaded");
        Ok(config)
    }

    /// Parse and validate config JSON.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let raw: RawConfig = serde_json::from_slice(bytes)?;
        raw.validate()
    }

    /// Serialize as the 4-space indented JSON stored in `c`.
    pub fn to_json(&self) -> Result<Zeroizing<Vec<u8>>> {
        codec::to_pretty_json(self)
    }

    pub fn encrypt_options(&self) -> EncryptOptions<'_> {
        EncryptOptions {
            recipient: &self.recipient,
            armor: self.armor,
            sign: self.sign,
        }
    }

    /// Vault address for `key` under this installation's digest.
    pub fn address(&self, key: &str) -> Result<Address> {
        address::derive(self.hash, key)
    }
}
