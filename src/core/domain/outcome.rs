//! Operation outcomes.
//!
//! States that are not failures but still need distinct handling by the
//! caller.

use crate::core::types::KeyName;

/// Result of listing the credential document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// No credentials are stored.
    Empty,
    /// Stored keys, sorted.
    Keys(Vec<KeyName>),
}

impl Listing {
    pub fn from_keys(mut keys: Vec<KeyName>) -> Self {
        if keys.is_empty() {
            return Self::Empty;
        }
        keys.sort();
        Self::Keys(keys)
    }
}

/// Result of an interactive edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edited {
    /// Changes were persisted; `key` is the (possibly renamed) key.
    Updated { key: KeyName },
    /// Nothing changed, nothing was written.
    Unchanged,
}

/// Result of an operation gated on user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmed<T> {
    Done(T),
    /// The user said no; nothing was touched.
    Declined,
}

/// Transaction decision returned by a mutation closure.
#[derive(Debug)]
pub enum Step<T> {
    /// Persist the mutated document.
    Commit(T),
    /// Leave the ciphertext untouched.
    Abort(T),
}
