//! Init command - provision a new installation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cli::output;
use crate::cli::prompt::{AssumeYes, Terminal};
use crate::core::address::Digest;
use crate::core::cipher::{Age, Cipher, CipherKind, Gpg};
use crate::core::config::Config;
use crate::core::constants::{DEFAULT_DIGEST, DEFAULT_STARTUP_FILE, HISTIGNORE_LINE};
use crate::core::layout::Layout;
use crate::core::prompt::{no_blanks, Prompt};
use crate::error::{ConfigError, Error, Result};

/// Answers given on the command line.
#[derive(Debug, Default)]
pub struct Options {
    pub recipient: Option<String>,
    pub armor: bool,
    pub sign: bool,
    pub digest: Option<String>,
    pub histignore: Option<PathBuf>,
    /// Directory to create `.stymie.d` in
    pub dir: Option<PathBuf>,
    /// Startup file for the `$STYMIE` export
    pub env_file: Option<PathBuf>,
    pub yes: bool,
}

/// Where an installation goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Directory holding `.stymie.d`.
    pub base: PathBuf,
    /// Startup file to export `$STYMIE` in. Set only when `base` is not
    /// where commands look by default.
    pub export: Option<PathBuf>,
}

impl Placement {
    pub fn layout(&self) -> Layout {
        Layout::in_base(&self.base)
    }

    fn export_line(&self) -> String {
        format!("export STYMIE=\"{}\"\n", self.base.display())
    }
}

/// Run the install wizard.
pub fn execute(kind: CipherKind, options: Options) -> Result<()> {
    let mut prompt: Box<dyn Prompt> = if options.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(Terminal)
    };
    let placement = place(&Layout::default_base()?, &options, prompt.as_mut())?;
    let layout = placement.layout();
    install(&layout, kind, options, prompt.as_mut())?;

    output::success(&format!("Installed {}", layout.root().display()));
    output::dimmed(&format!("  config    {}", layout.config().display()));
    output::dimmed(&format!("  entries   {}", layout.keys().display()));
    output::dimmed(&format!("  files     {}", layout.secrets().display()));

    if let Some(file) = &placement.export {
        if !update_startup_file(file, &placement.export_line(), "$STYMIE") {
            output::hint(&format!(
                "add this to your shell startup file: {}",
                placement.export_line().trim_end()
            ));
        }
    }
    Ok(())
}

/// Choose the directory to install in. Commands only find an installation
/// outside `default_base` through `$STYMIE`, so one elsewhere also gets a
/// startup file to export it in.
pub fn place(default_base: &Path, options: &Options, prompt: &mut dyn Prompt) -> Result<Placement> {
    let base = match &options.dir {
        Some(dir) => expand(dir)?,
        None if options.yes => default_base.to_path_buf(),
        None => {
            let default = default_base.display().to_string();
            let answer = prompt.input(
                "Enter directory to install .stymie.d in:",
                Some(default.as_str()),
                &no_blanks,
            )?;
            expand(Path::new(answer.trim()))?
        }
    };

    if base.as_path() == default_base {
        return Ok(Placement { base, export: None });
    }
    let export = match &options.env_file {
        Some(file) => file.clone(),
        None if options.yes => PathBuf::from(DEFAULT_STARTUP_FILE),
        None => PathBuf::from(prompt.input(
            "Shell startup file to export $STYMIE in:",
            Some(DEFAULT_STARTUP_FILE),
            &no_blanks,
        )?),
    };
    Ok(Placement {
        base,
        export: Some(export),
    })
}

/// Expand a leading `~` and anchor relative paths at the working directory.
fn expand(dir: &Path) -> Result<PathBuf> {
    let path = match dir.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().ok_or(ConfigError::NoHomeDir)?.join(rest),
        Err(_) => dir.to_path_buf(),
    };
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Collect the settings and provision `layout`.
pub fn install(
    layout: &Layout,
    kind: CipherKind,
    options: Options,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    if layout.root().exists() {
        return Err(ConfigError::AlreadyInstalled(layout.root().to_path_buf()).into());
    }

    let age = match kind {
        CipherKind::Age => {
            if options.recipient.is_some() {
                return Err(Error::Input(
                    "--recipient is generated for the age cipher".to_string(),
                ));
            }
            Some(Age::generate())
        }
        CipherKind::Gpg => None,
    };

    let recipient = match (&age, options.recipient) {
        (Some(age), _) => age.recipient(),
        (None, Some(recipient)) => recipient,
        (None, None) => prompt.input(
            "Enter the email address or key ID of your public key:",
            None,
            &no_blanks,
        )?,
    };

    let armor = if options.yes {
        options.armor
    } else {
        prompt.confirm("ASCII-armor encrypted files?", options.armor)?
    };
    let sign = if options.yes || kind == CipherKind::Age {
        options.sign && kind != CipherKind::Age
    } else {
        prompt.confirm("Also sign encrypted files? (Recommended)", options.sign)?
    };
    let digest = prompt.input(
        "Hashing algorithm for file names:",
        Some(options.digest.as_deref().unwrap_or(DEFAULT_DIGEST)),
        &|input| input.parse::<Digest>().map(|_| ()).map_err(|e| e.to_string()),
    )?;

    let histignore = match options.histignore {
        Some(path) => Some(path),
        None if options.yes => None,
        None => {
            if prompt.confirm("Prepend \"stymie *\" to $HISTIGNORE?", true)? {
                let file = prompt.input(
                    "Shell startup file to write it to:",
                    Some(DEFAULT_STARTUP_FILE),
                    &no_blanks,
                )?;
                Some(PathBuf::from(file))
            } else {
                None
            }
        }
    };

    let config = Config::new(recipient, armor, sign, digest.parse()?);
    let gpg = Gpg::new();
    let cipher: &dyn Cipher = match &age {
        Some(age) => age,
        None => &gpg,
    };

    layout.install(&config, cipher)?;
    if let Some(age) = &age {
        if let Err(e) = age.save(&layout.age_identity()) {
            layout.uninstall();
            return Err(e);
        }
        info!("saved age identity");
    }

    if let Some(file) = histignore {
        update_startup_file(&file, HISTIGNORE_LINE, "$HISTIGNORE");
    }
    Ok(())
}

/// Append `line` to a shell startup file, reporting the outcome. Failure
/// only warns: the installation itself is already in place.
fn update_startup_file(file: &Path, line: &str, variable: &str) -> bool {
    match append_line(file, line) {
        Ok(path) => {
            output::success(&format!("Updated {} in {}", variable, path.display()));
            true
        }
        Err(e) => {
            warn!(error = %e, variable, "failed to update shell startup file");
            output::warn(&format!("could not write {}: {}", file.display(), e));
            false
        }
    }
}

/// Relative paths are taken from the home directory.
fn append_line(file: &Path, line: &str) -> std::io::Result<PathBuf> {
    let path = if file.is_relative() {
        dirs::home_dir()
            .map(|home| home.join(file))
            .unwrap_or_else(|| file.to_path_buf())
    } else {
        file.to_path_buf()
    };

    let mut handle = OpenOptions::new().create(true).append(true).open(&path)?;
    handle.write_all(line.as_bytes())?;
    Ok(path)
}
