//! User input utilities for interactive command-line prompts.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use stell_core::{DiscardConfirmation, SettingKey};

/// Prompts the user for a string input.
///
/// The input is read from stdin and returned with whitespace trimmed.
pub fn prompt_string(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush stdout")?;
    read_trimmed_line(&mut io::stdin().lock())
}

/// Prompts the user for a yes/no confirmation.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive).
/// Empty input is treated as 'no'.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    loop {
        let input = prompt_string(&format!("{prompt} (y/N)"))?;
        match parse_confirmation(&input) {
            Some(answer) => return Ok(answer),
            None => eprintln!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}

fn read_trimmed_line(reader: &mut impl BufRead) -> Result<String> {
    let mut input = String::new();
    reader
        .read_line(&mut input)
        .context("Failed to read user input")?;
    Ok(input.trim().to_string())
}

fn parse_confirmation(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Asks on the terminal before unsaved edits are thrown away.
///
/// A failed read counts as "no" so edits are never lost to an I/O error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmation;

impl DiscardConfirmation for TerminalConfirmation {
    fn confirm_discard(&self, current: &SettingKey, next: &SettingKey) -> bool {
        let prompt = format!("{current} has unsaved changes. Discard them and open {next}?");
        prompt_confirmation(&prompt).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Confirmation prompt failed");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confirmation() {
        assert_eq!(parse_confirmation("Y"), Some(true));
        assert_eq!(parse_confirmation("yes"), Some(true));
        assert_eq!(parse_confirmation(""), Some(false));
        assert_eq!(parse_confirmation(" No "), Some(false));
        assert_eq!(parse_confirmation("maybe"), None);
    }

    #[test]
    fn test_read_trimmed_line() {
        let mut input = io::Cursor::new("  /about  \nrest");
        assert_eq!(read_trimmed_line(&mut input).unwrap(), "/about");
    }
}
