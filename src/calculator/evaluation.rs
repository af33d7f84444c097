//! Expression evaluation and result formatting.
//!
//! Normalizes a finished display expression, rewrites percentages, evaluates
//! the arithmetic and formats the result for the display.

use super::error::CalcError;
use super::parser::evaluate_arithmetic;
use super::percent::transform_percent;
use crate::config::{DisplayConfig, ERROR_DISPLAY};

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a valid numeric result.
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display.
        display_result: String,
    },
    /// The expression could not be evaluated.
    Error {
        /// The original expression.
        expression: String,
        /// Error message to display.
        message: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }
}

/// Drop one trailing operator or decimal point and map display glyphs to
/// ASCII arithmetic.
pub fn normalize_expression(expression: &str) -> String {
    let trimmed = expression
        .strip_suffix(['+', '-', '×', '÷', '*', '/', '.'])
        .unwrap_or(expression);
    trimmed.replace('×', "*").replace('÷', "/")
}

/// Evaluates expressions with a given set of display limits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator {
    display: DisplayConfig,
}

impl Evaluator {
    pub fn new(display: DisplayConfig) -> Self {
        Self { display }
    }

    /// Evaluate and return the display string: the formatted result, `"Error"`,
    /// or an empty string for an empty expression.
    pub fn evaluate(&self, expression: &str) -> String {
        self.evaluate_expression(expression)
            .map(|result| result.display().to_string())
            .unwrap_or_default()
    }

    /// Evaluate a display expression.
    ///
    /// Returns `None` for an empty expression.
    pub fn evaluate_expression(&self, input: &str) -> Option<CalcResult> {
        if input.is_empty() {
            return None;
        }

        let expression = input.to_string();
        match compute(input) {
            Ok(value) => Some(CalcResult::Success {
                display_result: self.format_result(value),
                expression,
                value,
            }),
            Err(e) => {
                tracing::warn!(%expression, error = %e, "Evaluation failed");
                Some(CalcResult::Error {
                    expression,
                    message: ERROR_DISPLAY.to_string(),
                })
            }
        }
    }

    /// Format a numeric result for display.
    ///
    /// Integers print in full unless they are longer than the display, in
    /// which case they switch to scientific notation. Fractions print with a
    /// fixed number of decimals and trailing zeros removed, switching to
    /// scientific notation for very large, very small or overlong values.
    pub fn format_result(&self, value: f64) -> String {
        let DisplayConfig {
            max_display_length,
            scientific_precision,
            decimal_places,
        } = self.display;

        // -0 shows as 0
        let value = if value == 0.0 { 0.0 } else { value };

        if value.fract() == 0.0 {
            let integer = format!("{value:.0}");
            if integer.len() > max_display_length {
                return format_scientific(value, scientific_precision);
            }
            return integer;
        }

        let magnitude = value.abs();
        if magnitude >= 1e12 || magnitude < 1e-6 {
            return format_scientific(value, scientific_precision);
        }

        let fixed = format!("{value:.decimal_places$}");
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        if trimmed.len() > max_display_length {
            return format_scientific(value, scientific_precision);
        }

        trimmed.to_string()
    }
}

fn compute(expression: &str) -> Result<f64, CalcError> {
    let normalized = normalize_expression(expression);
    if normalized.contains('%') {
        evaluate_arithmetic(&transform_percent(&normalized)?)
    } else {
        evaluate_arithmetic(&normalized)
    }
}

/// Scientific notation with a signed, at least two-digit exponent
/// (`1.234568e+12`).
fn format_scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

/// Evaluate a display expression with the default display limits.
pub fn evaluate_expression(input: &str) -> Option<CalcResult> {
    Evaluator::default().evaluate_expression(input)
}

/// Evaluate a display expression to its display string with the default
/// display limits.
pub fn evaluate(expression: &str) -> String {
    Evaluator::default().evaluate(expression)
}
