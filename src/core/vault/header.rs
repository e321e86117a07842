//! Key header embedded in vault plaintext.
//!
//! Every vault file written by stymie starts with one line naming the key
//! it belongs to:
//!
//! ```text
//! stymie-key: "example.com"
//! <secret bytes>
//! ```
//!
//! Reads and edits verify the header against the requested key, so two
//! keys that hash to the same address are reported instead of one
//! silently serving the other's content. Files without a header are
//! accepted unchanged.

use std::io::{self, Write};

use zeroize::Zeroizing;

use crate::error::{Result, SecretError};

const PREFIX: &[u8] = b"stymie-key: ";

/// Prepend the header for `key` to `content`.
pub fn frame(key: &str, content: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let name = serde_json::to_string(key)?;
    let mut out = Zeroizing::new(Vec::with_capacity(PREFIX.len() + name.len() + 1 + content.len()));
    out.extend_from_slice(PREFIX);
    out.extend_from_slice(name.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(content);
    Ok(out)
}

/// What the start of a plaintext says about its owner.
#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    /// Header present; content starts at the given offset.
    Header { stored: String, body: usize },
    /// No header.
    Legacy,
}

/// Inspect a complete first line (including its newline, if any).
fn parse(line: &[u8]) -> Parsed {
    let Some(rest) = line.strip_prefix(PREFIX) else {
        return Parsed::Legacy;
    };
    let Some(end) = rest.iter().position(|&b| b == b'\n') else {
        return Parsed::Legacy;
    };
    match serde_json::from_slice::<String>(&rest[..end]) {
        Ok(stored) => Parsed::Header {
            stored,
            body: PREFIX.len() + end + 1,
        },
        Err(_) => Parsed::Legacy,
    }
}

fn check(key: &str, stored: String) -> Result<()> {
    if stored != key {
        return Err(SecretError::AddressCollision {
            key: key.to_string(),
            stored,
        }
        .into());
    }
    Ok(())
}

/// Split a decrypted vault file into its content, verifying the header.
///
/// Returns the content and whether a header was present.
///
/// # Errors
///
/// Returns `SecretError::AddressCollision` if the header names another key.
pub fn split<'a>(key: &str, plaintext: &'a [u8]) -> Result<(&'a [u8], bool)> {
    match parse(plaintext) {
        Parsed::Header { stored, body } => {
            check(key, stored)?;
            Ok((&plaintext[body..], true))
        }
        Parsed::Legacy => Ok((plaintext, false)),
    }
}

enum State {
    /// Still looking for the end of the first line.
    Pending(Zeroizing<Vec<u8>>),
    /// Header verified (or absent); everything goes to the sink.
    Passing,
    /// Header names another key; everything is discarded.
    Collided(String),
}

/// Writer that verifies and strips the header while forwarding content.
///
/// Call [`finish`](Verified::finish) once the source is exhausted.
pub struct Verified<'a> {
    key: &'a str,
    sink: &'a mut dyn Write,
    state: State,
}

impl<'a> Verified<'a> {
    pub fn new(key: &'a str, sink: &'a mut dyn Write) -> Self {
        Self {
            key,
            sink,
            state: State::Pending(Zeroizing::new(Vec::new())),
        }
    }

    /// Flush anything still buffered and report a collision.
    pub fn finish(mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Passing) {
            State::Pending(buffered) => self.sink.write_all(&buffered)?,
            State::Passing => {}
            State::Collided(stored) => return check(self.key, stored),
        }
        self.sink.flush()?;
        Ok(())
    }

    fn resolve(&mut self, buffered: &[u8]) -> io::Result<State> {
        match parse(buffered) {
            Parsed::Header { stored, body } if stored == self.key => {
                self.sink.write_all(&buffered[body..])?;
                Ok(State::Passing)
            }
            Parsed::Header { stored, .. } => Ok(State::Collided(stored)),
            Parsed::Legacy => {
                self.sink.write_all(buffered)?;
                Ok(State::Passing)
            }
        }
    }
}

/// True once `buffered` can no longer grow into a header line.
fn cannot_be_header(buffered: &[u8]) -> bool {
    let n = buffered.len().min(PREFIX.len());
    buffered[..n] != PREFIX[..n]
}

impl Write for Verified<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.state {
            State::Passing => self.sink.write_all(buf)?,
            State::Collided(_) => {}
            State::Pending(buffered) => {
                buffered.extend_from_slice(buf);
                if buffered.contains(&b'\n') || cannot_be_header(buffered) {
                    let buffered = std::mem::take(&mut **buffered);
                    let buffered = Zeroizing::new(buffered);
                    self.state = self.resolve(&buffered)?;
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.state {
            State::Passing => self.sink.flush(),
            _ => Ok(()),
        }
    }
}
