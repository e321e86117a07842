//! Installation layout.
//!
//! Names every on-disk path under the installation root and owns the
//! transaction locks guarding them.
//!
//! ```text
//! <root>/c          encrypted config
//! <root>/k          encrypted credential document
//! <root>/k.lock     credential document lock
//! <root>/s/<addr>   one encrypted file per secret
//! <root>/s/.lock    vault lock
//! <root>/age.key    age identity (age backend only)
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::cipher::{self, Cipher};
use crate::core::config::Config;
use crate::core::constants::{
    AGE_IDENTITY, CONFIG_FILE, KEYS_FILE, KEYS_LOCK, ROOT_DIR, SECRETS_DIR, SECRETS_LOCK,
};
use crate::core::fs::{self, ScratchFile};
use crate::core::lock::{Lock, LockMode};
use crate::error::{ConfigError, Result};

/// Paths of one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Use `root` as the installation directory itself.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory commands look in for the installation: `$STYMIE`, else
    /// `$HOME`.
    pub fn default_base() -> Result<PathBuf> {
        match std::env::var_os("STYMIE").filter(|v| !v.is_empty()) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(dirs::home_dir().ok_or(ConfigError::NoHomeDir)?),
        }
    }

    /// `.stymie.d` inside [`Layout::default_base`].
    pub fn resolve() -> Result<Self> {
        Ok(Self::in_base(&Self::default_base()?))
    }

    /// `.stymie.d` inside `base`.
    pub fn in_base(base: &Path) -> Self {
        Self::at(base.join(ROOT_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn keys(&self) -> PathBuf {
        self.root.join(KEYS_FILE)
    }

    pub fn secrets(&self) -> PathBuf {
        self.root.join(SECRETS_DIR)
    }

    /// Vault file for `address`.
    pub fn secret(&self, address: &str) -> PathBuf {
        self.secrets().join(address)
    }

    pub fn age_identity(&self) -> PathBuf {
        self.root.join(AGE_IDENTITY)
    }

    pub fn keys_lock(&self) -> PathBuf {
        self.root.join(KEYS_LOCK)
    }

    pub fn secrets_lock(&self) -> PathBuf {
        self.secrets().join(SECRETS_LOCK)
    }

    /// An installation exists when its config file does.
    pub fn is_installed(&self) -> bool {
        self.config().is_file()
    }

    /// Lock the credential document.
    pub fn lock_keys(&self, mode: LockMode) -> Result<Lock> {
        Ok(Lock::acquire(&self.keys_lock(), mode)?)
    }

    /// Lock the vault. Taking it exclusively also erases scratch files a
    /// crashed edit left behind.
    pub fn lock_secrets(&self, mode: LockMode) -> Result<Lock> {
        let lock = Lock::acquire(&self.secrets_lock(), mode)?;
        if mode == LockMode::Exclusive {
            let swept = fs::sweep_scratch(&self.root)?;
            if swept > 0 {
                warn!(count = swept, "erased stale plaintext scratch files");
            }
        }
        Ok(lock)
    }

    /// Fresh owner-only plaintext file inside the root.
    pub fn scratch_file(&self) -> Result<ScratchFile> {
        Ok(ScratchFile::create(&self.root)?)
    }

    /// Provision a new installation.
    ///
    /// Creates the root and `s/` (0700), then encrypted `c` and an empty
    /// `k` (0600). On failure the partially created root is removed and
    /// the original error returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyInstalled` if the root already exists.
    pub fn install(&self, config: &Config, cipher: &dyn Cipher) -> Result<()> {
        if self.root.exists() {
            return Err(ConfigError::AlreadyInstalled(self.root.clone()).into());
        }
        if let Some(parent) = self.root.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        fs::create_private_dir(&self.root)?;

        match self.provision(config, cipher) {
            Ok(()) => {
                info!(root = %self.root.display(), cipher = cipher.name(), "installed");
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "install failed, removing partial root");
                self.uninstall();
                Err(e)
            }
        }
    }

    fn provision(&self, config: &Config, cipher: &dyn Cipher) -> Result<()> {
        fs::create_private_dir(&self.secrets())?;
        let options = config.encrypt_options();
        cipher::seal(cipher, &config.to_json()?, &self.config(), &options)?;
        cipher::seal(cipher, b"{}", &self.keys(), &options)?;
        Ok(())
    }

    /// Remove the root after a failed install.
    pub fn uninstall(&self) {
        if let Err(e) = std::fs::remove_dir_all(&self.root) {
            warn!(root = %self.root.display(), error = %e, "failed to remove partial installation");
        }
    }
}
