//! Encrypted file commands.

use std::io::{self, Read};
use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::prompt::{AssumeYes, Terminal};
use crate::core::cipher::CipherKind;
use crate::core::domain::{Confirmed, Edited};
use crate::core::editor::ExternalEditor;
use crate::core::fs::Erasure;
use crate::core::prompt::Prompt;
use crate::core::session::Session;
use crate::error::Result;

/// Read the content to encrypt: `-` is stdin, no path means the file
/// named after the key.
fn read_source(key: &str, from: Option<PathBuf>) -> Result<Zeroizing<Vec<u8>>> {
    let mut content = Zeroizing::new(Vec::new());
    match from {
        Some(path) if path.as_os_str() == "-" => {
            io::stdin().lock().read_to_end(&mut content)?;
        }
        Some(path) => {
            std::fs::File::open(path)?.read_to_end(&mut content)?;
        }
        None => {
            std::fs::File::open(key)?.read_to_end(&mut content)?;
        }
    }
    Ok(content)
}

pub fn add(cipher: Option<CipherKind>, key: &str, from: Option<PathBuf>) -> Result<()> {
    let session = Session::open(cipher)?;
    let vault = session.vault();

    // Fail on an existing address before reading any input.
    if vault.exists(key)? {
        return Err(crate::error::SecretError::AlreadyExists(key.to_string()).into());
    }
    let content = read_source(key, from)?;
    vault.create(key, &content)?;

    output::success("File created successfully");
    Ok(())
}

pub fn edit(cipher: Option<CipherKind>, key: &str) -> Result<()> {
    let session = Session::open(cipher)?;
    let editor = ExternalEditor::from_env();

    match session.vault().edit(key, &editor)? {
        Edited::Updated { .. } => output::success("Re-encrypted and closed the file"),
        Edited::Unchanged => output::info("No change"),
    }
    Ok(())
}

/// Stream the decrypted content to stdout.
pub fn get(cipher: Option<CipherKind>, key: &str) -> Result<()> {
    let session = Session::open(cipher)?;
    let mut stdout = io::stdout().lock();
    session.vault().read_to(key, &mut stdout)?;
    Ok(())
}

pub fn has(cipher: Option<CipherKind>, key: &str) -> Result<()> {
    let session = Session::open(cipher)?;
    if session.vault().exists(key)? {
        output::info("File exists");
    } else {
        output::info("No matching entry");
    }
    Ok(())
}

/// Print stored addresses; key names are not recoverable from them.
pub fn list(cipher: Option<CipherKind>) -> Result<()> {
    let session = Session::open(cipher)?;
    let addresses = session.vault().addresses()?;
    if addresses.is_empty() {
        output::info("No stored files");
        return Ok(());
    }
    for address in addresses {
        output::line(&address)?;
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

    match session.vault().remove(key, prompt.as_mut())? {
        Confirmed::Done(Erasure::Shredded) => output::success("The file has been removed"),
        Confirmed::Done(Erasure::Fallback) => {
            output::warn("shred is not installed; the file was overwritten once and unlinked");
            output::success("The file has been removed");
        }
        Confirmed::Declined => output::info("No removal"),
    }
    Ok(())
}
