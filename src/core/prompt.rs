//! Interactive answer collection.
//!
//! Core operations ask questions through [`Prompt`] so they can be driven
//! by a terminal, by `--yes`, or by a script in tests.

use zeroize::Zeroizing;

use crate::error::Result;

/// Input check; `Err` carries the message shown to the user.
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// Source of interactive answers.
pub trait Prompt {
    /// Yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Free-text answer, re-asked until `validate` accepts it.
    fn input(&mut self, message: &str, default: Option<&str>, validate: Validator<'_>)
        -> Result<String>;

    /// Hidden answer, re-asked until `validate` accepts it.
    fn password(&mut self, message: &str, validate: Validator<'_>) -> Result<Zeroizing<String>>;

    /// Show `text` to the user (e.g. a generated passphrase).
    fn show(&mut self, text: &str) -> Result<()>;
}

pub fn no_blanks(input: &str) -> std::result::Result<(), String> {
    if input.trim().is_empty() {
        return Err("Cannot be blank".to_string());
    }
    Ok(())
}

pub fn any(_: &str) -> std::result::Result<(), String> {
    Ok(())
}
