//! Error types for editing and evaluation.
//!
//! Neither type escapes the public operations: edits downgrade to a rejected
//! [`EditOutcome`](super::EditOutcome) and evaluation downgrades to `"Error"`.

use thiserror::Error;

/// Failure while evaluating an arithmetic expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("expression is empty")]
    EmptyExpression,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("parentheses nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("result is not a finite number")]
    NonFinite,
}

/// Failure while applying an edit to the expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("'{0}' is not a decimal digit")]
    InvalidDigit(char),
    #[error("expression is too short for this edit")]
    MissingContext,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}
