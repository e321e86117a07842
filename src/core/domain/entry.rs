//! Credential entry type.
//!
//! An ordered set of named string fields. Order is the order the fields
//! were entered and survives serialization. Values are zeroed on drop.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use crate::core::constants::RESERVED_FIELD;
use crate::core::types::FieldName;
use crate::error::{Error, Result};

/// One credential's fields.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Entry {
    fields: Vec<(FieldName, String)>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new field.
    ///
    /// # Errors
    ///
    /// Returns `Error::Input` for a blank, reserved or duplicate name.
    pub fn insert(&mut self, name: impl Into<FieldName>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name).map_err(Error::Input)?;
        if self.contains(&name) {
            return Err(Error::Input(format!("field '{}' already exists", name)));
        }
        self.fields.push((name, value.into()));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<FieldName>, value: impl Into<String>) -> Result<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Replace the value of an existing field, keeping its position.
    ///
    /// Returns `true` when the stored value changed.
    pub fn set(&mut self, name: &str, mut value: String) -> bool {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, current)) if *current != value => {
                current.zeroize();
                *current = value;
                true
            }
            _ => {
                value.zeroize();
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Fields in entry order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Field names in entry order.
    pub fn names(&self) -> Vec<FieldName> {
        self.fields.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Check a field name is usable. Usable as a prompt validator.
pub fn validate_name(name: &str) -> std::result::Result<(), String> {
    if name.trim().is_empty() {
        return Err("Cannot be blank".to_string());
    }
    if name == RESERVED_FIELD {
        return Err(format!("'{}' is a reserved field name", RESERVED_FIELD));
    }
    Ok(())
}

impl Drop for Entry {
    fn drop(&mut self) {
        for (_, value) in self.fields.iter_mut() {
            value.zeroize();
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("fields", &self.names())
            .finish_non_exhaustive()
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(EntryVisitor)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of string fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Entry, A::Error> {
        let mut entry = Entry::new();
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            // Entries are keyed by the document; a stored "key" field is redundant.
            if name == RESERVED_FIELD || entry.contains(&name) {
                continue;
            }
            entry.fields.push((name, value));
        }
        Ok(entry)
    }
}
