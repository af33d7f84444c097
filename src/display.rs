//! The two display lines shown to the user.

use crate::calculator::{CalcResult, EditOutcome};
use crate::config::{EMPTY_HISTORY, INITIAL_DISPLAY};

/// Primary line (live expression or result) and history line (the expression
/// that produced the result).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayLines {
    pub primary: String,
    pub history: String,
}

impl Default for DisplayLines {
    fn default() -> Self {
        Self {
            primary: INITIAL_DISPLAY.to_string(),
            history: EMPTY_HISTORY.to_string(),
        }
    }
}

impl DisplayLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the outcome of an edit. Rejected edits leave the display alone.
    ///
    /// Returns whether the display changed.
    pub fn apply_edit(&mut self, outcome: &EditOutcome) -> bool {
        if !outcome.changed {
            return false;
        }

        self.primary.clone_from(&outcome.display_text);
        self.history = EMPTY_HISTORY.to_string();
        true
    }

    /// Show an evaluation result.
    ///
    /// A success moves the evaluated expression to the history line; an
    /// error shows only the error text.
    pub fn apply_result(&mut self, result: &CalcResult) {
        match result {
            CalcResult::Success {
                expression,
                display_result,
                ..
            } => {
                self.primary.clone_from(display_result);
                self.history.clone_from(expression);
            }
            CalcResult::Error { message, .. } => {
                self.primary.clone_from(message);
                self.history = EMPTY_HISTORY.to_string();
            }
        }
    }
}
