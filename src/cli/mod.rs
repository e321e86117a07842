//! Command-line interface.

pub mod completions;
pub mod file;
pub mod init;
pub mod key;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::cipher::CipherKind;
use crate::core::passphrase::DEFAULT_WORDS;

/// stymie - A local secret manager.
#[derive(Parser)]
#[command(
    name = "stymie",
    about = "Encrypted credentials and files, addressed by hashed key names",
    version
)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Encryption backend [default: as installed; gpg for init]
    #[arg(long, global = true, env = "STYMIE_CIPHER")]
    pub cipher: Option<CipherKind>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the installation directory and encrypted config
    Init {
        /// Key to encrypt for (GPG key id/email; generated for age)
        #[arg(long)]
        recipient: Option<String>,
        /// ASCII-armor ciphertext
        #[arg(long)]
        armor: bool,
        /// Do not sign ciphertext
        #[arg(long)]
        no_sign: bool,
        /// Digest algorithm for vault file names
        #[arg(long)]
        digest: Option<String>,
        /// Append a HISTIGNORE export to this shell startup file
        #[arg(long, value_name = "FILE")]
        histignore: Option<PathBuf>,
        /// Directory to create .stymie.d in [default: $STYMIE or $HOME]
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Startup file to export $STYMIE in when --dir is elsewhere
        #[arg(long, value_name = "FILE")]
        env_file: Option<PathBuf>,
        /// Accept defaults instead of prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage credentials
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Manage encrypted files
    File {
        #[command(subcommand)]
        action: FileAction,
    },

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Credential subcommands.
#[derive(Subcommand)]
pub enum KeyAction {
    /// Add a credential (prompts for anything not given)
    Add {
        key: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// Visible in shell history; prefer the prompt
        #[arg(long)]
        password: Option<String>,
        /// Extra field, repeatable
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },

    /// Edit a credential interactively
    Edit { key: String },

    /// Print a credential, or one field of it
    Get {
        key: String,
        /// Print only this field, without a trailing newline
        #[arg(short, long)]
        field: Option<String>,
        /// Strip all whitespace from values
        #[arg(short, long)]
        strip: bool,
    },

    /// Check whether a credential exists
    Has { key: String },

    /// List credential keys
    List,

    /// Remove a credential
    Rm {
        key: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print a random passphrase
    Generate {
        /// Number of words
        #[arg(long, default_value_t = DEFAULT_WORDS)]
        words: usize,
    },
}

/// Encrypted file subcommands.
#[derive(Subcommand)]
pub enum FileAction {
    /// Encrypt a file into the vault
    Add {
        key: String,
        /// Read content from PATH, or stdin with `-` (default: the file named KEY)
        #[arg(long, value_name = "PATH")]
        from: Option<PathBuf>,
    },

    /// Edit an encrypted file in $VISUAL / $EDITOR
    Edit { key: String },

    /// Print an encrypted file's content
    Get { key: String },

    /// Check whether an encrypted file exists
    Has { key: String },

    /// List stored file addresses
    List,

    /// Securely remove an encrypted file
    Rm {
        key: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute a command.
pub fn execute(command: Command, cipher: Option<CipherKind>) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Init {
            recipient,
            armor,
            no_sign,
            digest,
            histignore,
            dir,
            env_file,
            yes,
        } => init::execute(
            cipher.unwrap_or_default(),
            init::Options {
                recipient,
                armor,
                sign: !no_sign,
                digest,
                histignore,
                dir,
                env_file,
                yes,
            },
        ),
        Key { action } => match action {
            KeyAction::Add {
                key,
                url,
                username,
                password,
                fields,
            } => key::add(cipher, &key, url, username, password, &fields),
            KeyAction::Edit { key } => key::edit(cipher, &key),
            KeyAction::Get { key, field, strip } => key::get(cipher, &key, field.as_deref(), strip),
            KeyAction::Has { key } => key::has(cipher, &key),
            KeyAction::List => key::list(cipher),
            KeyAction::Rm { key, yes } => key::rm(cipher, &key, yes),
            KeyAction::Generate { words } => key::generate(words),
        },
        File { action } => match action {
            FileAction::Add { key, from } => file::add(cipher, &key, from),
            FileAction::Edit { key } => file::edit(cipher, &key),
            FileAction::Get { key } => file::get(cipher, &key),
            FileAction::Has { key } => file::has(cipher, &key),
            FileAction::List => file::list(cipher),
            FileAction::Rm { key, yes } => file::rm(cipher, &key, yes),
        },
        Completions { shell } => completions::execute(shell),
    }
}
