//! Calculator module for editing and evaluating expressions.
//!
//! This module provides functionality to:
//! - Validate and apply keypad edits to an in-progress expression
//! - Rewrite percentages and evaluate the finished expression
//! - Format results for a fixed-width display

mod builder;
mod error;
mod evaluation;
mod manager;
mod operator;
mod parser;
mod percent;
mod state;
mod validation;

pub use builder::{append_digit, append_operator, format_number, normalize_number};
pub use error::{CalcError, EditError};
pub use evaluation::{CalcResult, Evaluator, evaluate, evaluate_expression, normalize_expression};
pub use manager::{EditOutcome, ExpressionManager};
pub use operator::Operator;
pub use parser::evaluate_arithmetic;
pub use percent::transform_percent;
pub use state::CalculationState;
pub use validation::{can_append_digit, can_append_dot, can_append_operator};
