//! stymie - A local secret manager with encrypted credentials and files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stymie::cli::output;
use stymie::cli::{execute, Cli};
use stymie::error::{CipherError, ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("STYMIE_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("stymie=debug")
        } else {
            EnvFilter::new("stymie=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.cipher) {
        // Format error with suggestion if available
        let error_msg = e.to_string();
        let suggestion = match &e {
            Error::Config(c) if c.is_missing() => Some("run: stymie init"),
            Error::Cipher(CipherError::Unavailable(_)) => {
                Some("install GnuPG, or use --cipher age")
            }
            Error::Cipher(CipherError::InvalidIdentity(_)) => {
                Some("check --cipher / STYMIE_CIPHER matches the cipher used at init")
            }
            Error::Config(ConfigError::AlreadyInstalled(_)) => {
                Some("remove the existing directory to reinstall")
            }
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
