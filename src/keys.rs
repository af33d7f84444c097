//! Keypad key decoding.
//!
//! Turns typed key names into [`Key`]s. A line may mix named keys separated by
//! whitespace (`12 neg + 3 =`) with compact runs of single-character keys
//! (`12+3=`).

use crate::calculator::Operator;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// A run of keys that are each a single character.
    static ref COMPACT_RUN: Regex = Regex::new(r"^[0-9+\-*/×÷xX.%=]+$").unwrap();
}

/// A calculator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Operator(Operator),
    DecimalPoint,
    Percent,
    ToggleSign,
    Backspace,
    Clear,
    Evaluate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

impl Key {
    /// Parse a single key name.
    pub fn parse(word: &str) -> Option<Self> {
        let mut chars = word.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(key) = Self::from_char(c)
        {
            return Some(key);
        }

        match word.to_ascii_lowercase().as_str() {
            "neg" | "sign" | "±" | "+/-" => Some(Self::ToggleSign),
            "bs" | "backspace" | "del" | "⟵" => Some(Self::Backspace),
            "c" | "ac" | "clear" | "⟸" => Some(Self::Clear),
            "enter" | "eq" => Some(Self::Evaluate),
            _ => None,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c)),
            '.' | ',' => Some(Self::DecimalPoint),
            '%' => Some(Self::Percent),
            '=' => Some(Self::Evaluate),
            c => Operator::from_char(c).map(Self::Operator),
        }
    }

    /// Parse a line of keys.
    pub fn parse_sequence(line: &str) -> Result<Vec<Self>, KeyError> {
        let mut keys = Vec::new();

        for word in line.split_whitespace() {
            if let Some(key) = Self::parse(word) {
                keys.push(key);
            } else if COMPACT_RUN.is_match(word) {
                keys.extend(word.chars().filter_map(Self::from_char));
            } else {
                return Err(KeyError::UnknownKey(word.to_string()));
            }
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keys() {
        assert_eq!(Key::parse("7"), Some(Key::Digit('7')));
        assert_eq!(Key::parse("*"), Some(Key::Operator(Operator::Multiply)));
        assert_eq!(Key::parse("÷"), Some(Key::Operator(Operator::Divide)));
        assert_eq!(Key::parse("."), Some(Key::DecimalPoint));
        assert_eq!(Key::parse("="), Some(Key::Evaluate));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(Key::parse("neg"), Some(Key::ToggleSign));
        assert_eq!(Key::parse("+/-"), Some(Key::ToggleSign));
        assert_eq!(Key::parse("BS"), Some(Key::Backspace));
        assert_eq!(Key::parse("C"), Some(Key::Clear));
        assert_eq!(Key::parse("enter"), Some(Key::Evaluate));
        assert_eq!(Key::parse("sqrt"), None);
    }

    #[test]
    fn test_compact_sequence() {
        let keys = Key::parse_sequence("12+3=").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Digit('1'),
                Key::Digit('2'),
                Key::Operator(Operator::Add),
                Key::Digit('3'),
                Key::Evaluate,
            ]
        );
    }

    #[test]
    fn test_mixed_sequence() {
        let keys = Key::parse_sequence("5 neg × 2 bs").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Digit('5'),
                Key::ToggleSign,
                Key::Operator(Operator::Multiply),
                Key::Digit('2'),
                Key::Backspace,
            ]
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            Key::parse_sequence("2 + pi"),
            Err(KeyError::UnknownKey("pi".to_string()))
        );
    }
}
