//! External editor.
//!
//! Vault files are edited as plaintext scratch files in the user's editor.
//! For vim-family editors extra flags keep swap, backup, undo and viminfo
//! copies of that plaintext from being written elsewhere.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Something that lets the user edit a file and blocks until done.
pub trait Editor {
    /// Edit `path` in place.
    ///
    /// # Errors
    ///
    /// Returns `Error::Editor` if the editor cannot be started or exits
    /// unsuccessfully.
    fn edit(&self, path: &Path) -> Result<()>;
}

/// Editor started as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEditor {
    program: String,
    args: Vec<String>,
}

const VIM_HARDENING: &[&str] = &[
    "-n",
    "-i",
    "NONE",
    "--cmd",
    "set nobackup nowritebackup noundofile noswapfile viminfo=",
];

impl ExternalEditor {
    /// `$VISUAL`, then `$EDITOR`, then `vim`.
    pub fn from_env() -> Self {
        let command = ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "vim".to_string());
        Self::parse(&command)
    }

    /// Split an editor command such as `code --wait` into program and args.
    pub fn parse(command: &str) -> Self {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_else(|| "vim".to_string());
        Self {
            program,
            args: words.collect(),
        }
    }

    fn is_vim_family(&self) -> bool {
        let name = Path::new(&self.program)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        matches!(
            name.as_str(),
            "vi" | "vim" | "nvim" | "gvim" | "mvim" | "vimdiff" | "view"
        )
    }

    fn args_for(&self, path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        if self.is_vim_family() {
            args.extend(VIM_HARDENING.iter().map(OsString::from));
        }
        args.push(path.as_os_str().to_owned());
        args
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        debug!(editor = %self.program, "launching editor");
        let status = Command::new(&self.program)
            .args(self.args_for(path))
            .status()
            .map_err(|e| Error::Editor(format!("failed to launch '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(Error::Editor(format!(
                "{} exited with code {}",
                self.program,
                status.code().unwrap_or(-1)
            )));
        }
        Ok(())
    }
}
