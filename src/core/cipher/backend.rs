//! Cipher backend selection and dispatch.
//!
//! Two modes:
//! - **Gpg** (default): the `gpg` CLI and the user's keyring
//! - **Age**: in-process age with the identity stored in the root

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;
use zeroize::Zeroizing;

use super::{Age, Cipher, EncryptOptions, Gpg};
use crate::core::layout::Layout;
use crate::error::{CipherError, Result};

/// Which transport to use, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CipherKind {
    #[default]
    Gpg,
    Age,
}

impl CipherKind {
    /// The backend `layout` was installed with. An age identity in the
    /// root means age; otherwise gpg.
    pub fn detect(layout: &Layout) -> Self {
        if layout.age_identity().is_file() {
            Self::Age
        } else {
            Self::Gpg
        }
    }
}

impl FromStr for CipherKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpg" => Ok(Self::Gpg),
            "age" => Ok(Self::Age),
            other => Err(format!("unknown cipher: {}. Supported: gpg, age", other)),
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpg => f.write_str("gpg"),
            Self::Age => f.write_str("age"),
        }
    }
}

/// Cipher backend for vault and store operations.
#[derive(Debug)]
pub enum CipherBackend {
    /// GPG encryption via the gpg CLI
    Gpg(Gpg),

    /// Age encryption with the installation identity
    Age(Age),
}

impl CipherBackend {
    /// Open the backend for an existing installation.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidIdentity` for the age backend when the
    /// identity file is missing or unreadable.
    pub fn open(kind: CipherKind, layout: &Layout) -> Result<Self> {
        debug!(cipher = %kind, "creating cipher backend");
        match kind {
            CipherKind::Gpg => Ok(Self::Gpg(Gpg::new())),
            CipherKind::Age => {
                let path = layout.age_identity();
                if !path.exists() {
                    return Err(CipherError::InvalidIdentity(format!(
                        "{} not found; was this installation created with --cipher age?",
                        path.display()
                    ))
                    .into());
                }
                Ok(Self::Age(Age::load(&path)?))
            }
        }
    }

    pub fn kind(&self) -> CipherKind {
        match self {
            Self::Gpg(_) => CipherKind::Gpg,
            Self::Age(_) => CipherKind::Age,
        }
    }

    fn inner(&self) -> &dyn Cipher {
        match self {
            Self::Gpg(gpg) => gpg,
            Self::Age(age) => age,
        }
    }
}

impl Cipher for CipherBackend {
    fn encrypt(&self, plaintext: &[u8], options: &EncryptOptions<'_>) -> Result<Vec<u8>> {
        self.inner().encrypt(plaintext, options)
    }

    fn decrypt(&self, source: &Path) -> Result<Zeroizing<Vec<u8>>> {
        self.inner().decrypt(source)
    }

    fn decrypt_to(&self, source: &Path, sink: &mut dyn Write) -> Result<()> {
        self.inner().decrypt_to(source, sink)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}
