//! stymie - A local secret manager.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Installation wizard
//! │   ├── key           # Credential commands
//! │   ├── file          # Vault file commands
//! │   ├── output        # Styled status lines
//! │   ├── prompt        # Terminal prompts
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── address       # Digest-derived vault file names
//!     ├── cipher/       # Encryption backends (gpg, age)
//!     ├── codec         # Credential document (de)serialization
//!     ├── config        # Encrypted installation settings
//!     ├── domain/       # Entries, documents, outcomes
//!     ├── editor        # $VISUAL / $EDITOR invocation
//!     ├── layout        # On-disk paths and installation
//!     ├── lock          # Advisory file locks
//!     ├── passphrase/   # Diceware-style passphrases
//!     ├── session       # Loaded config plus cipher
//!     ├── store/        # Credential document transactions
//!     ├── vault/        # One encrypted file per secret
//!     ├── wizard        # New-entry state machine
//!     └── fs            # Owner-only files, scratch files, secure delete
//! ```
//!
//! # Features
//!
//! - Credentials and arbitrary files encrypted at rest
//! - Key names never written to disk in the clear
//! - Plaintext erased from memory and disk when no longer needed
//! - GnuPG or age encryption

pub mod cli;
pub mod core;
pub mod error;
