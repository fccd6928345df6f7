//! `rofi -dmenu` backed picker and prompter

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::PromptError;

use super::{Picker, PromptResult, Prompter, normalize_answer};

/// Picks a connection through `rofi -dmenu`
///
/// Any dmenu-compatible program that accepts `-i -dmenu -p <label>` works.
#[derive(Debug, Clone)]
pub struct RofiPicker {
    program: String,
}

impl RofiPicker {
    /// Creates a picker using `program`
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for RofiPicker {
    fn default() -> Self {
        Self::new("rofi")
    }
}

impl Picker for RofiPicker {
    fn pick(&self, label: &str, candidates: &[String]) -> PromptResult<Option<String>> {
        let mut child = Command::new(&self.program)
            .args(["-i", "-dmenu", "-p", label])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(&self.program, &e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(candidates.join("\n").as_bytes())
                .map_err(|e| PromptError::Input(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| PromptError::Input(e.to_string()))?;

        // rofi exits non-zero when dismissed with Escape
        if !output.status.success() {
            tracing::debug!(code = ?output.status.code(), "Picker dismissed");
            return Ok(None);
        }

        Ok(normalize_answer(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Prompts for a value through `rofi -dmenu` with an empty list
#[derive(Debug, Clone)]
pub struct RofiPrompter {
    program: String,
}

impl RofiPrompter {
    /// Creates a prompter using `program`
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for RofiPrompter {
    fn default() -> Self {
        Self::new("rofi")
    }
}

impl Prompter for RofiPrompter {
    fn prompt(&self, label: &str, masked: bool) -> PromptResult<Option<String>> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-dmenu", "-p", label, "-lines", "0"]);
        if masked {
            cmd.arg("-password");
        }

        let output = cmd
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&self.program, &e))?;

        if !output.status.success() {
            return Ok(None);
        }

        Ok(normalize_answer(&String::from_utf8_lossy(&output.stdout)))
    }
}

fn spawn_error(program: &str, err: &std::io::Error) -> PromptError {
    PromptError::Spawn {
        program: program.to_string(),
        reason: err.to_string(),
    }
}
