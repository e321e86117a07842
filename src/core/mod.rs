//! Core library components.
//!
//! The encrypted credential store and content-addressed vault, the
//! transport and collaborator traits they depend on, and the on-disk
//! layout they share.

pub mod address;
pub mod cipher;
pub mod codec;
pub mod config;
pub mod constants;
pub mod domain;
pub mod editor;
pub mod fs;
pub mod layout;
pub mod lock;
pub mod passphrase;
pub mod prompt;
pub mod session;
pub mod store;
pub mod types;
pub mod vault;
pub mod wizard;
