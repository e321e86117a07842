//! Value display mode.

use std::borrow::Cow;

/// How field values are written to the terminal.
///
/// Chosen once per command and passed down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Raw,
    /// Every whitespace character removed, for piping into a clipboard.
    Stripped,
}

impl DisplayMode {
    pub fn from_flag(strip: bool) -> Self {
        if strip {
            Self::Stripped
        } else {
            Self::Raw
        }
    }
}

/// Render `value` under `mode`.
pub fn format_value(value: &str, mode: DisplayMode) -> Cow<'_, str> {
    match mode {
        DisplayMode::Raw => Cow::Borrowed(value),
        DisplayMode::Stripped => Cow::Owned(value.chars().filter(|c| !c.is_whitespace()).collect()),
    }
}
