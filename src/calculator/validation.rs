//! Input validation for the expression editor.
//!
//! Decides whether a key press may extend the current expression, looking
//! only at the expression's trailing characters.

use crate::config::{SPECIAL_CHARS, is_operator};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Boundaries between numeric segments.
    static ref SEGMENT_SEPARATORS: Regex = Regex::new(r"[+\-×÷()]").unwrap();
}

/// Character `n` positions back from the end (0 is the last character).
pub(crate) fn nth_from_end(expression: &str, n: usize) -> Option<char> {
    expression.chars().rev().nth(n)
}

/// Check if `digit` may be appended to `expression`.
///
/// A lone `0` never starts an expression, no digit follows `%`, and a `0`
/// placed right after an operator or `%` cannot grow into `05`.
pub fn can_append_digit(expression: &str, digit: char) -> bool {
    let Some(last) = nth_from_end(expression, 0) else {
        return digit != '0';
    };

    if last == '0'
        && nth_from_end(expression, 1).is_some_and(|prev| is_operator(prev) || prev == '%')
    {
        return false;
    }

    last != '%'
}

/// Check if an operator may be appended to `expression`.
///
/// An empty expression is accepted; the builder turns it into `0<op>`.
pub fn can_append_operator(expression: &str) -> bool {
    match nth_from_end(expression, 0) {
        None => true,
        Some(last) => is_operator(last) || SPECIAL_CHARS.contains(&last) || last.is_ascii_digit(),
    }
}

/// Check if a decimal point may be added to `expression`.
///
/// After a digit the current segment must not already have a point. After an
/// operator the point replaces it, so the segment before the operator is the
/// one checked, and it must not end in `)` or `%`.
pub fn can_append_dot(expression: &str) -> bool {
    let Some(last) = nth_from_end(expression, 0) else {
        return true;
    };

    let segments: Vec<&str> = SEGMENT_SEPARATORS.split(expression).collect();

    if last.is_ascii_digit() {
        return segments.last().is_some_and(|segment| !segment.contains('.'));
    }

    if is_operator(last) {
        let previous_segment = segments
            .len()
            .checked_sub(2)
            .and_then(|i| segments.get(i));
        let before_operator = nth_from_end(expression, 1);

        return previous_segment.is_some_and(|segment| !segment.contains('.'))
            && before_operator.is_some_and(|c| c != ')' && c != '%');
    }

    false
}
