//! Arithmetic evaluation for `+ - * / ( )` with the usual precedence.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := number | '(' expr ')'
//! ```
//!
//! Parentheses nest at most [`MAX_DEPTH`] levels deep.

use super::error::CalcError;
use std::iter::Peekable;
use std::vec::IntoIter;

/// Deepest parenthesis nesting accepted.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    ParenOpen,
    ParenClose,
}

/// Split plain arithmetic into tokens. Whitespace is ignored.
fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let end = scan_number(input, pos);
                let literal = &input[pos..end];
                while chars.peek().is_some_and(|&(i, _)| i < end) {
                    chars.next();
                }
                let value = literal
                    .parse()
                    .map_err(|_| CalcError::InvalidNumber(literal.to_string()))?;
                tokens.push(Token::Num(value));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::ParenOpen,
            ')' => Token::ParenClose,
            ch => return Err(CalcError::UnexpectedChar { ch, pos }),
        };
        chars.next();
        tokens.push(token);
    }

    Ok(tokens)
}

/// Byte offset one past the number literal starting at `start`.
///
/// Accepts `digits[.digits][e[+-]digits]`, which covers the scientific
/// notation produced by result formatting.
pub(crate) fn scan_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut end = start;

    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    end
}

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    depth: usize,
}

impl Parser {
    fn parse_expr(&mut self) -> Result<f64, CalcError> {
        let mut lhs = self.parse_term()?;

        while let Some(Token::Plus | Token::Minus) = self.tokens.peek() {
            let is_plus = self.tokens.next() == Some(Token::Plus);
            let rhs = self.parse_term()?;
            lhs = if is_plus { lhs + rhs } else { lhs - rhs };
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<f64, CalcError> {
        let mut lhs = self.parse_unary()?;

        while let Some(Token::Star | Token::Slash) = self.tokens.peek() {
            let is_mult = self.tokens.next() == Some(Token::Star);
            let rhs = self.parse_unary()?;
            lhs = if is_mult {
                lhs * rhs
            } else if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            } else {
                lhs / rhs
            };
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<f64, CalcError> {
        let mut negative = false;
        while let Some(Token::Plus | Token::Minus) = self.tokens.peek() {
            if self.tokens.next() == Some(Token::Minus) {
                negative = !negative;
            }
        }

        let value = self.parse_primary()?;
        Ok(if negative { -value } else { value })
    }

    fn parse_primary(&mut self) -> Result<f64, CalcError> {
        match self.tokens.next() {
            Some(Token::Num(num)) => Ok(num),
            Some(Token::ParenOpen) => {
                if self.depth == MAX_DEPTH {
                    return Err(CalcError::TooDeep(MAX_DEPTH));
                }
                self.depth += 1;
                let value = self.parse_expr()?;
                self.depth -= 1;
                match self.tokens.next() {
                    Some(Token::ParenClose) => Ok(value),
                    Some(_) | None => Err(CalcError::UnbalancedParens),
                }
            }
            Some(Token::ParenClose) => Err(CalcError::UnbalancedParens),
            Some(_) | None => Err(CalcError::UnexpectedEnd),
        }
    }
}

/// Evaluate a plain arithmetic expression.
///
/// Fails on malformed input, division by zero and non-finite results.
pub fn evaluate_arithmetic(input: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
        depth: 0,
    };
    let value = parser.parse_expr()?;

    if parser.tokens.next().is_some() {
        return Err(CalcError::UnbalancedParens);
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate_arithmetic("2+3*4"), Ok(14.0));
        assert_eq!(evaluate_arithmetic("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate_arithmetic("10-4-3"), Ok(3.0));
        assert_eq!(evaluate_arithmetic("12/3/2"), Ok(2.0));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate_arithmetic("(-5)+2"), Ok(-3.0));
        assert_eq!(evaluate_arithmetic("-5*2"), Ok(-10.0));
        assert_eq!(evaluate_arithmetic("3--5"), Ok(8.0));
        assert_eq!(evaluate_arithmetic("2*-3"), Ok(-6.0));
    }

    #[test]
    fn test_decimals_and_exponents() {
        assert_eq!(evaluate_arithmetic("0.5+0.25"), Ok(0.75));
        assert_eq!(evaluate_arithmetic("5."), Ok(5.0));
        assert_eq!(evaluate_arithmetic("1.5e+3*2"), Ok(3000.0));
        assert_eq!(evaluate_arithmetic("2e-2"), Ok(0.02));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate_arithmetic("5/0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate_arithmetic("5/(2-2)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(evaluate_arithmetic(""), Err(CalcError::EmptyExpression));
        assert_eq!(evaluate_arithmetic("5+"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate_arithmetic("(5+2"), Err(CalcError::UnbalancedParens));
        assert_eq!(evaluate_arithmetic("5+2)"), Err(CalcError::UnbalancedParens));
        assert_eq!(
            evaluate_arithmetic("5%2"),
            Err(CalcError::UnexpectedChar { ch: '%', pos: 1 })
        );
        assert!(matches!(
            evaluate_arithmetic("1.2.3"),
            Err(CalcError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |levels: usize| {
            format!("{}7{}", "(".repeat(levels), ")".repeat(levels))
        };
        assert_eq!(evaluate_arithmetic(&nested(MAX_DEPTH)), Ok(7.0));
        assert_eq!(
            evaluate_arithmetic(&nested(MAX_DEPTH + 1)),
            Err(CalcError::TooDeep(MAX_DEPTH))
        );
        assert_eq!(
            evaluate_arithmetic(&nested(200_000)),
            Err(CalcError::TooDeep(MAX_DEPTH))
        );
    }

    #[test]
    fn test_long_sign_runs() {
        let signs = "-".repeat(200_000);
        assert_eq!(evaluate_arithmetic(&format!("{signs}1")), Ok(1.0));
        assert_eq!(evaluate_arithmetic(&format!("-{signs}1")), Ok(-1.0));
        assert_eq!(evaluate_arithmetic(&format!("2*{signs}3")), Ok(6.0));
        assert_eq!(evaluate_arithmetic("+-+5"), Ok(-5.0));
    }

    #[test]
    fn test_overflow_is_error() {
        assert_eq!(evaluate_arithmetic("1e308*10"), Err(CalcError::NonFinite));
    }
}
