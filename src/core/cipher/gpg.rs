//! GPG cipher backend.
//!
//! Encrypts secrets using GnuPG (GNU Privacy Guard).
//!
//! ## Requirements
//!
//! - `gpg` CLI must be installed (or `STYMIE_GPG` must name a compatible program)
//! - The recipient's public key must be in the keyring
//! - The private key must be available for decryption (and signing)

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::{Cipher, EncryptOptions};
use crate::error::{CipherError, Result};

/// GPG cipher backend using the gpg CLI.
#[derive(Debug, Clone)]
pub struct Gpg {
    program: PathBuf,
}

impl Gpg {
    /// Use `$STYMIE_GPG` if set, else `gpg` from `PATH`.
    pub fn new() -> Self {
        let program = std::env::var_os("STYMIE_GPG")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("gpg"));
        Self { program }
    }

    #[cfg(test)]
    fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check if the gpg program is available.
    fn check(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| {
            CipherError::Unavailable(format!(
                "{} not found. Install GnuPG from https://gnupg.org/download/",
                self.program.display()
            ))
            .into()
        })
    }

    fn encrypt_args(options: &EncryptOptions<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--batch",
            "--yes",
            "--quiet",
            "--trust-model",
            "always",
            "--output",
            "-",
            "--encrypt",
            "--recipient",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        args.push(options.recipient.into());
        if options.armor {
            args.push("--armor".into());
        }
        if options.sign {
            args.push("--sign".into());
        }
        args
    }

    fn decrypt_args(source: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["--batch", "--yes", "--quiet", "--output", "-", "--decrypt"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(source.as_os_str().to_owned());
        args
    }
}

impl Default for Gpg {
    fn default() -> Self {
        Self::new()
    }
}

impl Cipher for Gpg {
    fn name(&self) -> &'static str {
        "gpg"
    }

    fn encrypt(&self, plaintext: &[u8], options: &EncryptOptions<'_>) -> Result<Vec<u8>> {
        trace!(
            plaintext_len = plaintext.len(),
            armor = options.armor,
            sign = options.sign,
            "encrypting with GPG"
        );

        let program = self.check()?;
        if options.recipient.trim().is_empty() {
            return Err(CipherError::InvalidRecipient("empty recipient".to_string()).into());
        }

        let mut child = Command::new(program)
            .args(Self::encrypt_args(options))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CipherError::EncryptionFailed(format!("failed to spawn gpg: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CipherError::EncryptionFailed("gpg stdin unavailable".to_string()))?;

        // Feed stdin from a second thread so a large plaintext cannot
        // deadlock against gpg filling its stdout pipe.
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(plaintext));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "writer panicked")));
            (output, written)
        });

        let output = output
            .map_err(|e| CipherError::EncryptionFailed(format!("gpg command failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CipherError::EncryptionFailed(format!(
                "gpg encrypt failed: {}",
                stderr.trim()
            ))
            .into());
        }
        written.map_err(|e| {
            CipherError::EncryptionFailed(format!("failed to write plaintext: {}", e))
        })?;

        trace!(ciphertext_len = output.stdout.len(), "encrypted with GPG");
        Ok(output.stdout)
    }

    fn decrypt(&self, source: &Path) -> Result<Zeroizing<Vec<u8>>> {
        let mut plaintext = Zeroizing::new(Vec::new());
        self.decrypt_to(source, &mut *plaintext)?;
        Ok(plaintext)
    }

    fn decrypt_to(&self, source: &Path, sink: &mut dyn Write) -> Result<()> {
        trace!(path = %source.display(), "decrypting with GPG");

        let program = self.check()?;
        let mut child = Command::new(program)
            .args(Self::decrypt_args(source))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CipherError::DecryptionFailed(format!("failed to spawn gpg: {}", e)))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| CipherError::DecryptionFailed("gpg stdout unavailable".to_string()))?;

        let stderr_pipe = child.stderr.take();

        // Drain stderr alongside stdout; gpg blocks once either pipe fills.
        let (copied, stderr) = std::thread::scope(|scope| {
            let reader = scope.spawn(move || {
                let mut diagnostics = Vec::new();
                if let Some(mut pipe) = stderr_pipe {
                    let _ = pipe.read_to_end(&mut diagnostics);
                }
                String::from_utf8_lossy(&diagnostics).into_owned()
            });
            let copied = io::copy(&mut stdout, &mut *sink);
            if copied.is_err() {
                let _ = child.kill();
            }
            (copied, reader.join().unwrap_or_default())
        });

        let status = child
            .wait()
            .map_err(|e| CipherError::DecryptionFailed(format!("gpg command failed: {}", e)))?;

        let copied = copied?;
        if !status.success() {
            return Err(CipherError::DecryptionFailed(format!(
                "gpg decrypt failed: {}. Ensure you have the private key in your keyring.",
                stderr.trim()
            ))
            .into());
        }
        if !stderr.trim().is_empty() {
            debug!(gpg = %stderr.trim(), "gpg diagnostics");
        }
        sink.flush()?;

        trace!(plaintext_len = copied, "decrypted with GPG");
        Ok(())
    }
}
