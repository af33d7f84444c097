//! The expression editing state machine.
//!
//! [`ExpressionManager`] owns the [`CalculationState`] and applies key presses
//! to it through the validation and builder rules. Every operation returns an
//! [`EditOutcome`]; an edit that cannot be applied leaves the expression as it
//! was and reports `changed = false`.

use super::builder::{append_digit, append_operator, normalize_number, replace_last};
use super::error::EditError;
use super::evaluation::{CalcResult, Evaluator};
use super::operator::Operator;
use super::state::CalculationState;
use super::validation::{can_append_digit, can_append_dot, can_append_operator, nth_from_end};
use crate::config::{INITIAL_DISPLAY, is_operator};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// The number at the end of an expression: `12`, `1.5`, `(-3)` or `(3)`.
    /// A whole expression may also be a shown result such as `-3` or
    /// `1.234568e+12`.
    static ref TRAILING_NUMBER: Regex = Regex::new(
        r"(?:^-?[0-9]+(?:\.[0-9]+)?(?:e[+-][0-9]+)?|[0-9]+(?:\.[0-9]+)?|\(-?[0-9]+(?:\.[0-9]+)?(?:e[+-][0-9]+)?\))$"
    ).unwrap();
}

/// Result of an editing operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    /// Whether the edit was applied. When false the display must not change.
    pub changed: bool,
    /// Text to display; [`INITIAL_DISPLAY`] means "show the reset state".
    pub display_text: String,
}

impl EditOutcome {
    /// Check if the display should show its reset state.
    pub fn shows_initial_display(&self) -> bool {
        self.changed && self.display_text == INITIAL_DISPLAY
    }
}

/// What an operation did to the expression.
enum Edit {
    /// The expression changed; show it.
    Changed,
    /// The expression was cleared (or left empty); show the reset state.
    Reset,
    /// The key does not apply here.
    Rejected,
}

#[derive(Clone, Debug, Default)]
pub struct ExpressionManager {
    state: CalculationState,
    evaluator: Evaluator,
}

impl ExpressionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Self {
            state: CalculationState::new(),
            evaluator,
        }
    }

    pub fn state(&self) -> &CalculationState {
        &self.state
    }

    /// The current expression text.
    pub fn expression(&self) -> &str {
        self.state.expression()
    }

    pub fn add_digit(&mut self, digit: char) -> EditOutcome {
        let result = self.try_add_digit(digit);
        self.finish("add_digit", result)
    }

    pub fn add_operator(&mut self, operator: Operator) -> EditOutcome {
        let result = self.try_add_operator(operator);
        self.finish("add_operator", result)
    }

    pub fn add_decimal_point(&mut self) -> EditOutcome {
        let result = self.try_add_decimal_point();
        self.finish("add_decimal_point", result)
    }

    pub fn toggle_sign(&mut self) -> EditOutcome {
        let result = self.try_toggle_sign();
        self.finish("toggle_sign", result)
    }

    pub fn add_percent(&mut self) -> EditOutcome {
        let result = self.try_add_percent();
        self.finish("add_percent", result)
    }

    /// Backspace.
    pub fn clear_last_input(&mut self) -> EditOutcome {
        let result = self.try_clear_last_input();
        self.finish("clear_last_input", result)
    }

    pub fn clear_all(&mut self) -> EditOutcome {
        let result = self.try_clear_all();
        self.finish("clear_all", result)
    }

    /// Evaluate the current expression.
    ///
    /// On success the formatted result becomes the new expression; on failure
    /// the expression is cleared. Either way the next digit starts a new
    /// expression. Returns `None` and changes nothing if the expression is empty.
    pub fn evaluate(&mut self) -> Option<CalcResult> {
        let result = self
            .evaluator
            .evaluate_expression(self.state.expression())?;

        self.state.mark_calculation_done();
        match &result {
            CalcResult::Success { display_result, .. } => {
                self.state.set_expression(display_result.clone());
            }
            CalcResult::Error { .. } => self.state.clear_expression(),
        }

        tracing::debug!(
            expression = result.expression(),
            display = result.display(),
            "Evaluated"
        );
        Some(result)
    }

    fn finish(&self, operation: &str, result: Result<Edit, EditError>) -> EditOutcome {
        let expression = self.state.expression();
        match result {
            Ok(Edit::Changed) => {
                tracing::trace!(operation, expression, "Edit applied");
                EditOutcome {
                    changed: true,
                    display_text: expression.to_string(),
                }
            }
            Ok(Edit::Reset) => {
                tracing::trace!(operation, "Expression reset");
                EditOutcome {
                    changed: true,
                    display_text: INITIAL_DISPLAY.to_string(),
                }
            }
            Ok(Edit::Rejected) => {
                tracing::debug!(operation, expression, "Edit rejected");
                self.unchanged()
            }
            Err(e) => {
                tracing::debug!(operation, expression, error = %e, "Edit failed");
                self.unchanged()
            }
        }
    }

    fn unchanged(&self) -> EditOutcome {
        EditOutcome {
            changed: false,
            display_text: self.state.expression().to_string(),
        }
    }

    fn try_add_digit(&mut self, digit: char) -> Result<Edit, EditError> {
        if !digit.is_ascii_digit() {
            return Err(EditError::InvalidDigit(digit));
        }

        if self.state.is_calculation_done() {
            self.state.reset_calculation_state();
            if digit == '0' {
                self.state.clear_expression();
                return Ok(Edit::Reset);
            }
            self.state.set_expression(digit.to_string());
            return Ok(Edit::Changed);
        }

        let expression = self.state.expression();
        if expression.is_empty() && digit == '0' {
            return Ok(Edit::Reset);
        }
        if !can_append_digit(expression, digit) {
            return Ok(Edit::Rejected);
        }

        let updated = append_digit(expression, digit);
        self.state.set_expression(updated);
        Ok(Edit::Changed)
    }

    fn try_add_operator(&mut self, operator: Operator) -> Result<Edit, EditError> {
        self.state.reset_calculation_state();

        let expression = self.state.expression();
        if !can_append_operator(expression) {
            return Ok(Edit::Rejected);
        }

        let updated = append_operator(expression, operator);
        self.state.set_expression(updated);
        Ok(Edit::Changed)
    }

    fn try_add_decimal_point(&mut self) -> Result<Edit, EditError> {
        if self.state.is_calculation_done() || self.state.expression().is_empty() {
            self.state.reset_calculation_state();
            self.state.set_expression("0.");
            return Ok(Edit::Changed);
        }

        let expression = self.state.expression();
        if !can_append_dot(expression) {
            return Ok(Edit::Rejected);
        }

        let last = nth_from_end(expression, 0).ok_or(EditError::MissingContext)?;
        let updated = if last.is_ascii_digit() {
            format!("{expression}.")
        } else if is_operator(last) {
            match nth_from_end(expression, 1) {
                Some(')' | '%') => return Ok(Edit::Rejected),
                Some(_) => replace_last(expression, '.'),
                None => return Err(EditError::MissingContext),
            }
        } else {
            return Ok(Edit::Rejected);
        };

        self.state.set_expression(updated);
        Ok(Edit::Changed)
    }

    fn try_toggle_sign(&mut self) -> Result<Edit, EditError> {
        self.state.reset_calculation_state();

        let expression = self.state.expression();
        let Some(number) = TRAILING_NUMBER.find(expression) else {
            return Ok(Edit::Rejected);
        };

        let literal = number.as_str();
        if normalize_number(literal)? == 0.0 {
            return Ok(Edit::Rejected);
        }

        // Rewrite the typed text so digits such as `2.50` survive unchanged
        let unwrapped = literal.trim_start_matches('(').trim_end_matches(')');
        let toggled = match unwrapped.strip_prefix('-') {
            Some(digits) => digits.to_string(),
            None => format!("(-{unwrapped})"),
        };
        let updated = format!("{}{toggled}", &expression[..number.start()]);
        self.state.set_expression(updated);
        Ok(Edit::Changed)
    }

    fn try_add_percent(&mut self) -> Result<Edit, EditError> {
        self.state.reset_calculation_state();

        let expression = self.state.expression();
        let Some(last) = nth_from_end(expression, 0) else {
            return Ok(Edit::Rejected);
        };

        let updated = if is_operator(last) {
            match nth_from_end(expression, 1) {
                Some('%') => return Ok(Edit::Rejected),
                Some(_) => replace_last(expression, '%'),
                None => return Err(EditError::MissingContext),
            }
        } else if last == '%' || last == '.' {
            replace_last(expression, '%')
        } else {
            format!("{expression}%")
        };

        self.state.set_expression(updated);
        Ok(Edit::Changed)
    }

    fn try_clear_last_input(&mut self) -> Result<Edit, EditError> {
        if self.state.is_calculation_done() {
            self.state.reset_calculation_state();
            self.state.clear_expression();
            return Ok(Edit::Reset);
        }

        let expression = self.state.expression();
        let length = expression.chars().count();
        if length <= 1 {
            self.state.clear_expression();
            return Ok(Edit::Reset);
        }

        if let Some(body) = expression.strip_suffix(')') {
            // Unwrap the signed number: "3×(-5)" becomes "3×5"
            let Some(open) = body.rfind('(') else {
                return Ok(Edit::Rejected);
            };
            let inner = &body[open + 1..];
            let digits = inner.strip_prefix('-').unwrap_or(inner);
            let updated = format!("{}{digits}", &body[..open]);
            self.state.set_expression(updated);
            return Ok(Edit::Changed);
        }

        if length == 2 && expression.starts_with('0') {
            self.state.clear_expression();
            return Ok(Edit::Reset);
        }

        let mut updated = expression.to_string();
        updated.pop();
        self.state.set_expression(updated);
        Ok(Edit::Changed)
    }

    fn try_clear_all(&mut self) -> Result<Edit, EditError> {
        self.state.reset_calculation_state();

        if self.state.expression().is_empty() {
            return Ok(Edit::Rejected);
        }

        self.state.clear_expression();
        Ok(Edit::Reset)
    }
}
