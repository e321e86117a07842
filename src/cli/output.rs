//! Shared CLI output helpers.
//!
//! Status lines go to stderr so stdout carries only secret content and
//! can be piped. Colors follow the terminal and are disabled by NO_COLOR.

use std::io::{self, Write};

use console::{style, StyledObject};

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn styled(text: &str) -> StyledObject<&str> {
    let text = style(text).for_stderr();
    if colors_enabled() {
        text
    } else {
        text.force_styling(false)
    }
}

/// `✓ Entry created successfully`
pub fn success(msg: &str) {
    eprintln!("{} {}", styled("✓").green().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", styled("✗").red().bold(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", styled("⚠").yellow().bold(), msg);
}

/// `ℹ No matching key`
pub fn info(msg: &str) {
    eprintln!("{} {}", styled("ℹ").blue().bold(), msg);
}

/// `→ run: stymie init`
pub fn hint(msg: &str) {
    eprintln!("{} {}", styled("→").cyan(), styled(msg).cyan());
}

pub fn dimmed(msg: &str) {
    eprintln!("{}", styled(msg).dim());
}

/// A key name for use inside a status line.
pub fn key(k: &str) -> String {
    styled(k).cyan().to_string()
}

/// Write one `name: value` line of an entry to stdout.
pub fn field(name: &str, value: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}: {}", name, value)
}

/// Write `text` to stdout as-is, with no trailing newline.
pub fn raw(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Write a line to stdout.
pub fn line(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", text)
}
