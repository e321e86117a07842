//! Error types.
//!
//! One top-level [`Error`] wraps a small enum per domain so callers can
//! match on the failure category while `?` keeps propagation terse.

use std::path::PathBuf;
use thiserror::Error;

/// Failures addressing secrets and credential entries.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("no matching entry: {0}")]
    NotFound(String),

    #[error("no field '{field}' in entry {key}")]
    FieldNotFound { key: String, field: String },

    #[error("file already exists: {0}")]
    AlreadyExists(String),

    #[error("key already exists: {0}")]
    DuplicateKey(String),

    #[error("address collision: {key} resolves to a file holding '{stored}'")]
    AddressCollision { key: String, stored: String },
}

/// Failures loading or provisioning the installation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config unavailable at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    #[error("already installed: {0} exists")]
    AlreadyInstalled(PathBuf),

    #[error("config is missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("unsupported digest algorithm: {0}")]
    UnsupportedDigest(String),

    #[error("unable to determine home directory (set $STYMIE)")]
    NoHomeDir,
}

impl ConfigError {
    /// True when the installation root or config file does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Unavailable { path, .. } if !path.exists())
    }
}

/// Failures reported by the encryption transport.
///
/// Messages are opaque; they are surfaced as-is and never parsed.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("cipher unavailable: {0}")]
    Unavailable(String),

    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("editor failed: {0}")]
    Editor(String),

    #[error("input rejected: {0}")]
    Input(String),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
