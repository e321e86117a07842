//! Test fixtures and constants.

use stymie::core::domain::Entry;

/// A typical website credential.
pub const EXAMPLE_FIELDS: &[(&str, &str)] = &[
    ("url", "https://example.com/login"),
    ("username", "alice"),
    ("password", "correct horse battery staple"),
];

/// Content with bytes that are not valid UTF-8.
pub const BINARY_CONTENT: &[u8] = &[0x00, 0xff, 0xfe, b'\n', 0x7f, 0x80, b's', b'e', b'c'];

/// Build an entry from ordered `(name, value)` pairs.
pub fn entry(fields: &[(&str, &str)]) -> Entry {
    fields.iter().fold(Entry::new(), |entry, (name, value)| {
        entry.with(*name, *value).expect("invalid field")
    })
}
