//! Line protocol for the interactive `scan` command.
//!
//! A line scanner (or a person at the keyboard) writes one decoded code per
//! line. Lines starting with `:` are commands.

use crate::record::{ScanCode, ScanOutcome};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// A scan attempt, successful or cancelled.
    Scan(ScanOutcome),
    /// Reset the display (`:done` or `:clear`).
    Clear,
    /// Leave the session (`:quit`).
    Quit,
    /// An unrecognised `:` command.
    Unknown(String),
}

/// Parse one line of scanner input.
///
/// Trailing line endings and surrounding whitespace are stripped; an empty
/// line is a cancelled scan.
#[must_use]
pub fn parse_line(line: &str) -> InputLine {
    let trimmed = line.trim();
    match trimmed {
        ":done" | ":clear" => InputLine::Clear,
        ":quit" => InputLine::Quit,
        command if command.starts_with(':') => InputLine::Unknown(command.to_string()),
        code => match ScanCode::try_from(code) {
            Ok(code) => InputLine::Scan(ScanOutcome::Scanned(code)),
            Err(_) => InputLine::Scan(ScanOutcome::Cancelled),
        },
    }
}
