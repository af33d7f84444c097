//! Expression text transformations.
//!
//! These functions assume the edit was already validated.

use super::error::EditError;
use super::operator::Operator;
use crate::config::is_operator;

/// Format a number the way it is written inside an expression.
///
/// Integers lose their fractional part and negatives are wrapped in
/// parentheses: `-5.0` becomes `(-5)`, `2.5` stays `2.5`.
pub fn format_number(number: f64) -> String {
    if number < 0.0 {
        format!("({number})")
    } else {
        format!("{number}")
    }
}

/// Parse a number that may be wrapped in parentheses, e.g. `(-2.5)`.
pub fn normalize_number(number: &str) -> Result<f64, EditError> {
    number
        .trim_matches(|c| c == '(' || c == ')')
        .parse()
        .map_err(|_| EditError::InvalidNumber(number.to_string()))
}

/// Append a digit. A digit after `)` starts a new factor, so `×` goes in between.
pub fn append_digit(expression: &str, digit: char) -> String {
    let mut result = String::with_capacity(expression.len() + 3);
    result.push_str(expression);
    if expression.ends_with(')') {
        result.push(Operator::Multiply.glyph());
    }
    result.push(digit);
    result
}

/// Append an operator, replacing a trailing operator or decimal point.
pub fn append_operator(expression: &str, operator: Operator) -> String {
    let mut result = if expression.is_empty() {
        String::from("0")
    } else {
        expression.to_string()
    };

    if result.ends_with(|c: char| is_operator(c) || c == '.') {
        result.pop();
    }

    result.push(operator.glyph());
    result
}

/// Replace the last character of `expression` with `replacement`.
pub(crate) fn replace_last(expression: &str, replacement: char) -> String {
    let mut result = expression.to_string();
    result.pop();
    result.push(replacement);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-5.0), "(-5)");
        assert_eq!(format_number(-2.5), "(-2.5)");
        assert_eq!(format_number(0.25), "0.25");
    }

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number("(-5)"), Ok(-5.0));
        assert_eq!(normalize_number("12.5"), Ok(12.5));
        assert_eq!(normalize_number("(3)"), Ok(3.0));
        assert!(normalize_number("(-)").is_err());
    }

    #[test]
    fn test_append_digit() {
        assert_eq!(append_digit("", '4'), "4");
        assert_eq!(append_digit("12+", '4'), "12+4");
        assert_eq!(append_digit("(-5)", '2'), "(-5)×2");
    }

    #[test]
    fn test_append_operator() {
        assert_eq!(append_operator("", Operator::Add), "0+");
        assert_eq!(append_operator("5", Operator::Divide), "5÷");
        assert_eq!(append_operator("5+", Operator::Subtract), "5-");
        assert_eq!(append_operator("5×", Operator::Add), "5+");
        assert_eq!(append_operator("5.", Operator::Multiply), "5×");
        assert_eq!(append_operator("5%", Operator::Add), "5%+");
        assert_eq!(append_operator("(-5)", Operator::Add), "(-5)+");
    }

    #[test]
    fn test_replace_last() {
        assert_eq!(replace_last("5×", '%'), "5%");
        assert_eq!(replace_last("5÷", '.'), "5.");
    }
}
