//! Terminal picker and prompter used by `--terminal`
//!
//! Menus and prompts are written to stderr so stdout stays clean for
//! `--dry-run` output.

use std::io::{self, BufRead, Write};

use rdplaunch_core::error::PromptError;
use rdplaunch_core::menu::{Picker, PromptResult, Prompter};

/// Numbered menu on stdin/stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPicker;

impl Picker for TerminalPicker {
    fn pick(&self, label: &str, candidates: &[String]) -> PromptResult<Option<String>> {
        let mut stderr = io::stderr().lock();
        for (index, candidate) in candidates.iter().enumerate() {
            writeln!(stderr, "{:>3}) {candidate}", index + 1).map_err(input_error)?;
        }
        write!(stderr, "{label} ").map_err(input_error)?;
        stderr.flush().map_err(input_error)?;

        Ok(read_line()?.and_then(|answer| choose(&answer, candidates)))
    }
}

/// Line prompts; masked prompts use `rpassword`
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&self, label: &str, masked: bool) -> PromptResult<Option<String>> {
        if masked {
            let answer = rpassword::prompt_password(format!("{label}: ")).map_err(input_error)?;
            return Ok(non_empty(&answer));
        }

        let mut stderr = io::stderr().lock();
        write!(stderr, "{label}: ").map_err(input_error)?;
        stderr.flush().map_err(input_error)?;
        read_line()
    }
}

/// Reads one line; EOF and blank input mean the user declined
fn read_line() -> PromptResult<Option<String>> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).map_err(input_error)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(non_empty(&line))
}

/// Resolves an answer as an exact candidate name, else a 1-based index
fn choose(answer: &str, candidates: &[String]) -> Option<String> {
    if let Some(name) = candidates.iter().find(|c| c.as_str() == answer) {
        return Some(name.clone());
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|i| candidates.get(i))
        .cloned()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn input_error(err: io::Error) -> PromptError {
    PromptError::Input(err.to_string())
}
