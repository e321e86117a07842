//! Constants used throughout stymie.
//!
//! Centralizes on-disk names and defaults.

/// Installation directory created under `$STYMIE` or `$HOME`.
pub const ROOT_DIR: &str = ".stymie.d";

/// Encrypted config document.
pub const CONFIG_FILE: &str = "c";

/// Encrypted credential document.
pub const KEYS_FILE: &str = "k";

/// Directory holding one encrypted file per secret.
pub const SECRETS_DIR: &str = "s";

/// Lock guarding credential document transactions.
pub const KEYS_LOCK: &str = "k.lock";

/// Lock guarding vault transactions (inside [`SECRETS_DIR`]).
pub const SECRETS_LOCK: &str = ".lock";

/// age identity used by the age cipher backend.
pub const AGE_IDENTITY: &str = "age.key";

/// Prefix of plaintext scratch files created while editing.
pub const SCRATCH_PREFIX: &str = ".edit-";

/// Mode for every directory stymie creates.
pub const DIR_MODE: u32 = 0o700;

/// Mode for every file stymie creates.
pub const FILE_MODE: u32 = 0o600;

/// Digest used when the installer is not told otherwise.
pub const DEFAULT_DIGEST: &str = "sha256";

/// Reserved field name; entries are keyed externally.
pub const RESERVED_FIELD: &str = "key";

/// Shell startup file offered when one must be written, relative to `$HOME`.
pub const DEFAULT_STARTUP_FILE: &str = ".bashrc";

/// Line appended to a shell startup file to keep stymie out of history.
pub const HISTIGNORE_LINE: &str = "export HISTIGNORE=\"stymie *:$HISTIGNORE\"\n";
