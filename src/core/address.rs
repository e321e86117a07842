//! Vault file addressing.
//!
//! A secret's key name is never written to disk in the clear. Its vault
//! file is named by the hex digest of the key, using the algorithm chosen
//! at install time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::Digest as _;

use crate::core::types::Address;
use crate::error::{ConfigError, Result, SecretError};

/// Digest algorithm used to derive vault file names.
///
/// Parsed case-insensitively. OpenSSL-style names written by older
/// installers (`sha256WithRSAEncryption`, `RSA-SHA256`) map to the same
/// algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Digest {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl Digest {
    /// Canonical name, as written to new config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512-224",
            Self::Sha512_256 => "sha512-256",
        }
    }

    /// Lowercase hex digest of `data`.
    pub fn hex(&self, data: &[u8]) -> String {
        match self {
            Self::Sha224 => to_hex(&sha2::Sha224::digest(data)),
            Self::Sha256 => to_hex(&sha2::Sha256::digest(data)),
            Self::Sha384 => to_hex(&sha2::Sha384::digest(data)),
            Self::Sha512 => to_hex(&sha2::Sha512::digest(data)),
            Self::Sha512_224 => to_hex(&sha2::Sha512_224::digest(data)),
            Self::Sha512_256 => to_hex(&sha2::Sha512_256::digest(data)),
        }
    }
}

impl FromStr for Digest {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered
            .strip_prefix("rsa-")
            .unwrap_or(&lowered)
            .trim_end_matches("withrsaencryption")
            .replace('/', "-")
            .replace("sha-", "sha");

        match name.as_str() {
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            "sha512-224" => Ok(Self::Sha512_224),
            "sha512-256" => Ok(Self::Sha512_256),
            _ => Err(ConfigError::UnsupportedDigest(s.to_string())),
        }
    }
}

impl TryFrom<String> for Digest {
    type Error = ConfigError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.name().to_string()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derive the vault address for `key`.
///
/// # Errors
///
/// Returns `SecretError::InvalidKey` if `key` is empty.
pub fn derive(digest: Digest, key: &str) -> Result<Address> {
    if key.is_empty() {
        return Err(SecretError::InvalidKey("key cannot be empty".to_string()).into());
    }
    Ok(digest.hex(key.as_bytes()))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
