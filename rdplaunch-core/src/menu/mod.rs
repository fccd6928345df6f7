//! Interactive menu collaborators
//!
//! A [`Picker`] chooses one entry from a list, a [`Prompter`] asks for a
//! free-text value. Both are synchronous: the caller blocks until the user
//! answers or dismisses the menu.
//!
//! `Ok(None)` always means the user declined. `Err` is reserved for the menu
//! tool itself failing to run.

mod rofi;

pub use rofi::{RofiPicker, RofiPrompter};

use crate::error::PromptError;

/// Result type for menu operations
pub type PromptResult<T> = Result<T, PromptError>;

/// Chooses one string out of a list of candidates
pub trait Picker {
    /// Shows `candidates` under `label` and returns the chosen entry
    ///
    /// # Errors
    /// Returns `PromptError` if the menu could not be shown.
    fn pick(&self, label: &str, candidates: &[String]) -> PromptResult<Option<String>>;
}

/// Asks the user for a single value
pub trait Prompter {
    /// Asks for a value under `label`; `masked` hides the typed text
    ///
    /// # Errors
    /// Returns `PromptError` if the prompt could not be shown.
    fn prompt(&self, label: &str, masked: bool) -> PromptResult<Option<String>>;
}

/// Normalizes raw menu output: trims the trailing newline and maps empty
/// input to `None`.
pub(crate) fn normalize_answer(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
