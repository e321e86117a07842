//! Scripted collaborators.
//!
//! Stand-ins for the terminal, the external editor, the passphrase source
//! and the encryption transport, so library flows run without a tty.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};

use stymie::core::cipher::{Cipher, EncryptOptions};
use stymie::core::editor::Editor;
use stymie::core::passphrase::Passphrase;
use stymie::core::prompt::{Prompt, Validator};
use stymie::error::{CipherError, Error, Result};
use zeroize::Zeroizing;

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Answer {
    Yes,
    No,
    Text(String),
    Secret(String),
    /// Accept whatever default the question offers.
    Default,
}

pub fn text(s: &str) -> Answer {
    Answer::Text(s.to_string())
}

pub fn secret(s: &str) -> Answer {
    Answer::Secret(s.to_string())
}

/// Prompt answering from a queue, like a user typing at the terminal.
///
/// An answer the validator rejects is recorded and the question asked
/// again with the next answer, as dialoguer does.
#[derive(Debug, Default)]
pub struct Script {
    answers: VecDeque<Answer>,
    /// Every question asked, in order.
    pub asked: Vec<String>,
    /// Answers rejected by a validator.
    pub rejected: Vec<String>,
    /// Text shown to the user.
    pub shown: Vec<String>,
}

impl Script {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Nothing left unanswered.
    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, message: &str) -> Answer {
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for {:?}", message))
    }
}

impl Prompt for Script {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        self.asked.push(message.to_string());
        match self.next(message) {
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            Answer::Default => Ok(default),
            other => panic!("expected yes/no for {:?}, got {:?}", message, other),
        }
    }

    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String> {
        self.asked.push(message.to_string());
        loop {
            let answer = match self.next(message) {
                Answer::Text(s) => s,
                Answer::Default => default
                    .unwrap_or_else(|| panic!("{:?} has no default", message))
                    .to_string(),
                other => panic!("expected text for {:?}, got {:?}", message, other),
            };
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(_) => self.rejected.push(answer),
            }
        }
    }

    fn password(&mut self, message: &str, validate: Validator<'_>) -> Result<Zeroizing<String>> {
        self.asked.push(message.to_string());
        loop {
            let answer = match self.next(message) {
                Answer::Secret(s) => s,
                other => panic!("expected a password for {:?}, got {:?}", message, other),
            };
            match validate(&answer) {
                Ok(()) => return Ok(Zeroizing::new(answer)),
                Err(_) => self.rejected.push(answer),
            }
        }
    }

    fn show(&mut self, text: &str) -> Result<()> {
        self.shown.push(text.to_string());
        Ok(())
    }
}

/// Editor that replaces the file content, recording the path it was given.
#[derive(Debug, Default)]
pub struct Rewrite {
    content: Option<Vec<u8>>,
    pub seen: RefCell<Option<(PathBuf, Vec<u8>)>>,
}

impl Rewrite {
    pub fn with(content: &[u8]) -> Self {
        Self {
            content: Some(content.to_vec()),
            seen: RefCell::new(None),
        }
    }

    /// Editor that saves without changing anything.
    pub fn untouched() -> Self {
        Self::default()
    }

    pub fn seen_path(&self) -> PathBuf {
        self.seen.borrow().as_ref().expect("editor never ran").0.clone()
    }

    pub fn seen_content(&self) -> Vec<u8> {
        self.seen.borrow().as_ref().expect("editor never ran").1.clone()
    }
}

impl Editor for Rewrite {
    fn edit(&self, path: &Path) -> Result<()> {
        let before = std::fs::read(path)?;
        *self.seen.borrow_mut() = Some((path.to_path_buf(), before));
        if let Some(content) = &self.content {
            let mut file = std::fs::File::create(path)?;
            file.write_all(content)?;
        }
        Ok(())
    }
}

/// Editor that scribbles on the file and then exits unsuccessfully.
#[derive(Debug, Default)]
pub struct Crashing {
    pub seen: RefCell<Option<PathBuf>>,
}

impl Editor for Crashing {
    fn edit(&self, path: &Path) -> Result<()> {
        *self.seen.borrow_mut() = Some(path.to_path_buf());
        std::fs::write(path, b"half-typed")?;
        Err(Error::Editor("exited with status 1".to_string()))
    }
}

/// Passphrase source yielding fixed candidates in turn.
#[derive(Debug)]
pub struct Candidates {
    phrases: Vec<&'static str>,
    next: Cell<usize>,
}

impl Candidates {
    pub fn new(phrases: &[&'static str]) -> Self {
        Self {
            phrases: phrases.to_vec(),
            next: Cell::new(0),
        }
    }

    /// How many candidates were generated.
    pub fn generated(&self) -> usize {
        self.next.get()
    }
}

impl Passphrase for Candidates {
    fn generate(&self) -> Zeroizing<String> {
        let i = self.next.get();
        self.next.set(i + 1);
        Zeroizing::new(self.phrases[i % self.phrases.len()].to_string())
    }
}

/// Cipher that cannot encrypt or decrypt anything.
#[derive(Debug, Default)]
pub struct Broken;

impl Cipher for Broken {
    fn encrypt(&self, _plaintext: &[u8], _options: &EncryptOptions<'_>) -> Result<Vec<u8>> {
        Err(CipherError::EncryptionFailed("no secret key".to_string()).into())
    }

    fn decrypt(&self, _source: &Path) -> Result<Zeroizing<Vec<u8>>> {
        Err(CipherError::DecryptionFailed("no secret key".to_string()).into())
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

/// Cipher that decrypts through `inner` but refuses to encrypt.
#[derive(Debug)]
pub struct ReadOnly<C> {
    pub inner: C,
}

impl<C: Cipher> Cipher for ReadOnly<C> {
    fn encrypt(&self, _plaintext: &[u8], _options: &EncryptOptions<'_>) -> Result<Vec<u8>> {
        Err(CipherError::EncryptionFailed("agent refused".to_string()).into())
    }

    fn decrypt(&self, source: &Path) -> Result<Zeroizing<Vec<u8>>> {
        self.inner.decrypt(source)
    }

    fn name(&self) -> &'static str {
        "read-only"
    }
}

/// Cipher that stores plaintext as-is, for writing hand-crafted vault
/// files.
#[derive(Debug, Default)]
pub struct Plain;

impl Cipher for Plain {
    fn encrypt(&self, plaintext: &[u8], _options: &EncryptOptions<'_>) -> Result<Vec<u8>> {
        Ok(plaintext.to_vec())
    }

    fn decrypt(&self, source: &Path) -> Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(std::fs::read(source)?))
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}
