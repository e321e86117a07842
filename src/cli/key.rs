//! Credential commands.

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::prompt::{AssumeYes, Terminal};
use crate::core::cipher::CipherKind;
use crate::core::domain::{format_value, Confirmed, DisplayMode, Edited, Listing};
use crate::core::passphrase::{Passphrase, WordList};
use crate::core::prompt::Prompt;
use crate::core::session::Session;
use crate::core::wizard::{EntryWizard, Prefill};
use crate::error::{Error, Result};

/// Split a `name=value` flag.
pub fn parse_field(raw: &str) -> Result<(String, Zeroizing<String>)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), Zeroizing::new(value.to_string())))
        }
        _ => Err(Error::Input(format!("expected NAME=VALUE, got '{}'", raw))),
    }
}

/// Add a credential, prompting for whatever the flags leave out.
pub fn add(
    cipher: Option<CipherKind>,
    key: &str,
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    fields: &[String],
) -> Result<()> {
    let prefill = Prefill {
        url,
        username,
        password: password.map(Zeroizing::new),
        fields: fields
            .iter()
            .map(|f| parse_field(f))
            .collect::<Result<Vec<_>>>()?,
    };

    let session = Session::open(cipher)?;
    let store = session.store();
    let mut prompt = Terminal;
    let words = WordList::default();

    EntryWizard::new(&store, &mut prompt, &words)
        .with_prefill(prefill)
        .run(key)?;

    output::success("Entry created successfully");
    Ok(())
}

pub fn edit(cipher: Option<CipherKind>, key: &str) -> Result<()> {
    let session = Session::open(cipher)?;
    match session.store().edit(key, &mut Terminal)? {
        Edited::Updated { key } => {
            output::success(&format!("{} has been updated", output::key(&key)))
        }
        Edited::Unchanged => output::info("No change"),
    }
    Ok(())
}

/// Print an entry as `name: value` lines, or one raw field value.
pub fn get(cipher: Option<CipherKind>, key: &str, field: Option<&str>, strip: bool) -> Result<()> {
    let mode = DisplayMode::from_flag(strip);
    debug!(?mode, "display mode");

    let session = Session::open(cipher)?;
    let store = session.store();

    match field {
        Some(field) => {
            let value = store.field(key, field)?;
            // No trailing newline so the value can be piped to a clipboard.
            output::raw(&format_value(&value, mode))?;
        }
        None => {
            let entry = store.get(key)?;
            for (name, value) in entry.fields() {
                output::field(name, &format_value(value, mode))?;
            }
        }
    }
    Ok(())
}

pub fn has(cipher: Option<CipherKind>, key: &str) -> Result<()> {
    let session = Session::open(cipher)?;
    if session.store().has(key)? {
        output::info("Key exists");
    } else {
        output::info("No matching key");
    }
    Ok(())
}

pub fn list(cipher: Option<CipherKind>) -> Result<()> {
    let session = Session::open(cipher)?;
    match session.store().list()? {
        Listing::Empty => output::info("No installed keys"),
        Listing::Keys(keys) => {
            for key in keys {
                output::line(&key)?;
            }
        }
    }
    Ok(())
}

pub fn rm(cipher: Option<CipherKind>, key: &str, yes: bool) -> Result<()> {
    let session = Session::open(cipher)?;
    let mut prompt: Box<dyn Prompt> = if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(Terminal)
    };

    match session.store().remove(key, prompt.as_mut())? {
        Confirmed::Done(()) => output::success(&format!("{} has been removed", output::key(key))),
        Confirmed::Declined => output::info("No removal"),
    }
    Ok(())
}

/// Print a passphrase. Needs no installation.
pub fn generate(words: usize) -> Result<()> {
    let phrase = WordList::new(words).generate();
    output::line(&phrase)?;
    Ok(())
}
