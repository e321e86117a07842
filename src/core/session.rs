//! An opened installation.
//!
//! Resolves the layout, opens the cipher and loads the config once, then
//! hands out the vault and store borrowing them.

use tracing::debug;

use crate::core::cipher::{CipherBackend, CipherKind};
use crate::core::config::Config;
use crate::core::layout::Layout;
use crate::core::store::KeyStore;
use crate::core::vault::Vault;
use crate::error::{ConfigError, Result};

#[derive(Debug)]
pub struct Session {
    layout: Layout,
    cipher: CipherBackend,
    config: Config,
}

impl Session {
    /// Open the installation at the default location.
    pub fn open(kind: Option<CipherKind>) -> Result<Self> {
        Self::open_at(Layout::resolve()?, kind)
    }

    /// Open the installation described by `layout`, with `kind` or else
    /// the cipher it was installed with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Unavailable` if nothing is installed there.
    pub fn open_at(layout: Layout, kind: Option<CipherKind>) -> Result<Self> {
        if !layout.is_installed() {
            return Err(ConfigError::Unavailable {
                path: layout.config(),
                reason: "not installed".to_string(),
            }
            .into());
        }
        let kind = kind.unwrap_or_else(|| CipherKind::detect(&layout));
        let cipher = CipherBackend::open(kind, &layout)?;
        let config = Config::load(&layout, &cipher)?;
        debug!(root = %layout.root().display(), cipher = %kind, "session opened");
        Ok(Self {
            layout,
            cipher,
            config,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> KeyStore<'_> {
        KeyStore::new(&self.layout, &self.config, &self.cipher)
    }

    pub fn vault(&self) -> Vault<'_> {
        Vault::new(&self.layout, &self.config, &self.cipher)
    }
}
