//! New-credential wizard.
//!
//! Collects an entry through the prompt collaborator as an explicit state
//! machine:
//!
//! ```text
//! CollectingCredentials → CollectingFields → Persisting → Done
//! ```
//!
//! Answers supplied up front (command-line flags) skip their prompts. When
//! url, username and password are all supplied the wizard asks nothing.

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::domain::{validate_name, Entry};
use crate::core::passphrase::Passphrase;
use crate::core::prompt::{no_blanks, Prompt};
use crate::core::store::KeyStore;
use crate::error::{Result, SecretError};

/// Answers known before the wizard starts.
#[derive(Default)]
pub struct Prefill {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<Zeroizing<String>>,
    /// Extra `name=value` fields, in order.
    pub fields: Vec<(String, Zeroizing<String>)>,
}

impl Prefill {
    fn is_complete(&self) -> bool {
        self.url.is_some() && self.username.is_some() && self.password.is_some()
    }
}

enum State {
    CollectingCredentials,
    CollectingFields(Entry),
    Persisting(Entry),
    Done,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            Self::CollectingCredentials => "collecting credentials",
            Self::CollectingFields(_) => "collecting fields",
            Self::Persisting(_) => "persisting",
            Self::Done => "done",
        }
    }
}

/// Interactive creation of one credential entry.
pub struct EntryWizard<'a, 's> {
    store: &'a KeyStore<'s>,
    prompt: &'a mut dyn Prompt,
    passphrase: &'a dyn Passphrase,
    prefill: Prefill,
}

impl<'a, 's> EntryWizard<'a, 's> {
    pub fn new(
        store: &'a KeyStore<'s>,
        prompt: &'a mut dyn Prompt,
        passphrase: &'a dyn Passphrase,
    ) -> Self {
        Self {
            store,
            prompt,
            passphrase,
            prefill: Prefill::default(),
        }
    }

    pub fn with_prefill(mut self, prefill: Prefill) -> Self {
        self.prefill = prefill;
        self
    }

    /// Collect and store a new entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::InvalidKey` for a blank key and
    /// `SecretError::DuplicateKey` if `key` exists, both before any prompt.
    pub fn run(mut self, key: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(SecretError::InvalidKey("no key name".to_string()).into());
        }
        if self.store.has(key)? {
            return Err(SecretError::DuplicateKey(key.to_string()).into());
        }

        let interactive = !self.prefill.is_complete();
        let mut state = State::CollectingCredentials;
        loop {
            debug!(state = state.name(), "wizard");
            state = match state {
                State::CollectingCredentials => State::CollectingFields(self.credentials()?),
                State::CollectingFields(entry) => {
                    State::Persisting(self.fields(entry, interactive)?)
                }
                State::Persisting(entry) => {
                    self.store.add(key, entry)?;
                    State::Done
                }
                State::Done => return Ok(()),
            };
        }
    }

    fn credentials(&mut self) -> Result<Entry> {
        let url = match self.prefill.url.take() {
            Some(url) => url,
            None => self.prompt.input("Enter url:", None, &no_blanks)?,
        };
        let username = match self.prefill.username.take() {
            Some(username) => username,
            None => self.prompt.input("Enter username:", None, &no_blanks)?,
        };
        let password = match self.prefill.password.take() {
            Some(password) => password,
            None => self.password()?,
        };

        Entry::new()
            .with("url", url)?
            .with("username", username)?
            .with("password", password.as_str())
    }

    fn password(&mut self) -> Result<Zeroizing<String>> {
        if !self.prompt.confirm("Generate passphrase?", false)? {
            return self.prompt.password("Enter password:", &no_blanks);
        }
        loop {
            let candidate = self.passphrase.generate();
            self.prompt.show(&candidate)?;
            if self.prompt.confirm("Accept?", true)? {
                return Ok(candidate);
            }
        }
    }

    fn fields(&mut self, mut entry: Entry, interactive: bool) -> Result<Entry> {
        for (name, value) in std::mem::take(&mut self.prefill.fields) {
            entry.insert(name, value.as_str())?;
        }
        if !interactive {
            return Ok(entry);
        }

        while self.prompt.confirm("Create another field?", false)? {
            let name = self.prompt.input("Name:", None, &|input| {
                validate_name(input)?;
                if entry.contains(input) {
                    return Err("Field already exists".to_string());
                }
                Ok(())
            })?;
            let value = Zeroizing::new(self.prompt.input("Value:", None, &no_blanks)?);
            entry.insert(name, value.as_str())?;
        }
        Ok(entry)
    }
}
