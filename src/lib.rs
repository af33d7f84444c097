//! A desk calculator core: a keypad-driven expression editor and a
//! percent-aware evaluator.
//!
//! The host owns a [`Session`] (or an [`ExpressionManager`] directly), feeds
//! it key presses and renders the [`DisplayLines`] it maintains.

pub mod calculator;
pub mod config;
pub mod display;
pub mod keys;
pub mod session;

pub use calculator::{CalcResult, EditOutcome, Evaluator, ExpressionManager, Operator, evaluate};
pub use config::{Config, DisplayConfig};
pub use display::DisplayLines;
pub use keys::Key;
pub use session::Session;
