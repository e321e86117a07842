//! Terminal prompts.

use console::Term;
use dialoguer::{Confirm, Input, Password};
use zeroize::Zeroizing;

use crate::core::prompt::{Prompt, Validator};
use crate::error::{Error, Result};

/// Prompts answered interactively on the terminal.
#[derive(Debug, Default)]
pub struct Terminal;

impl Prompt for Terminal {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()?)
    }

    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(message)
            .validate_with(|answer: &String| validate(answer));
        if let Some(default) = default {
            input = input.default(default.to_string()).show_default(true);
        }
        Ok(input.interact_text()?)
    }

    fn password(&mut self, message: &str, validate: Validator<'_>) -> Result<Zeroizing<String>> {
        let answer = Password::new()
            .with_prompt(message)
            .validate_with(|answer: &String| validate(answer))
            .interact()?;
        Ok(Zeroizing::new(answer))
    }

    fn show(&mut self, text: &str) -> Result<()> {
        Term::stderr().write_line(text)?;
        Ok(())
    }
}

/// Answers every confirmation with yes and accepts defaults, for `--yes`.
///
/// Questions without a default cannot be answered.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&mut self, _message: &str, _default: bool) -> Result<bool> {
        Ok(true)
    }

    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String> {
        let answer = default
            .ok_or_else(|| Error::Input(format!("'{}' needs an answer; rerun without --yes", message)))?;
        validate(answer).map_err(Error::Input)?;
        Ok(answer.to_string())
    }

    fn password(&mut self, message: &str, _validate: Validator<'_>) -> Result<Zeroizing<String>> {
        Err(Error::Input(format!(
            "'{}' needs an answer; rerun without --yes",
            message
        )))
    }

    fn show(&mut self, text: &str) -> Result<()> {
        Term::stderr().write_line(text)?;
        Ok(())
    }
}
