//! A calculator session: one expression manager and its display.

use crate::calculator::{Evaluator, ExpressionManager};
use crate::config::Config;
use crate::display::DisplayLines;
use crate::keys::Key;

/// Applies keys to an [`ExpressionManager`] and keeps [`DisplayLines`] in sync.
///
/// Each key press runs to completion before the next one is handled; callers
/// on an async UI should hold the session behind a single owner or a mutex.
#[derive(Clone, Debug, Default)]
pub struct Session {
    manager: ExpressionManager,
    display: DisplayLines,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            manager: ExpressionManager::with_evaluator(Evaluator::new(config.display)),
            display: DisplayLines::new(),
        }
    }

    pub fn display(&self) -> &DisplayLines {
        &self.display
    }

    pub fn manager(&self) -> &ExpressionManager {
        &self.manager
    }

    /// Handle one key press. Returns whether the display changed.
    pub fn press(&mut self, key: Key) -> bool {
        let outcome = match key {
            Key::Digit(digit) => self.manager.add_digit(digit),
            Key::Operator(operator) => self.manager.add_operator(operator),
            Key::DecimalPoint => self.manager.add_decimal_point(),
            Key::Percent => self.manager.add_percent(),
            Key::ToggleSign => self.manager.toggle_sign(),
            Key::Backspace => self.manager.clear_last_input(),
            Key::Clear => self.manager.clear_all(),
            Key::Evaluate => {
                return match self.manager.evaluate() {
                    Some(result) => {
                        self.display.apply_result(&result);
                        true
                    }
                    None => false,
                };
            }
        };

        self.display.apply_edit(&outcome)
    }

    /// Handle a sequence of key presses in order.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }
}
