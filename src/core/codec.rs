//! JSON encoding for plaintext documents.

use serde::Serialize;
use zeroize::Zeroizing;

use crate::error::Result;

/// Serialize `value` as JSON indented with four spaces.
///
/// The buffer holds plaintext, so it is zeroed when dropped.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Zeroizing<Vec<u8>>> {
    let mut out = Zeroizing::new(Vec::with_capacity(256));
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut *out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}
