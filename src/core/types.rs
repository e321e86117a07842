//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A user-chosen key name (e.g., `example.com`, `notes`).
pub type KeyName = String;

/// A credential field name (e.g., `url`, `username`, `password`).
pub type FieldName = String;

/// Hex digest naming a vault file on disk.
pub type Address = String;

/// Recipient identifier understood by the configured cipher.
///
/// A GPG key id/email for gpg, an `age1...` public key for age.
pub type Recipient = String;
