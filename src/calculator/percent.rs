//! Rewriting of `%` tokens into plain arithmetic.
//!
//! After `+` or `-` a percentage is taken of the number before the operator,
//! so `100+10%` means `100+(100*10/100)`. Anywhere else it is a fraction:
//! `20%` means `(20/100)`. When a percentage is followed by an operator and
//! another percentage, the running value becomes the base of the next one,
//! which makes `100+10%+10%` compound to `121`.

use super::error::CalcError;
use super::parser::scan_number;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Piece<'a> {
    /// A number literal as written, parentheses included.
    Number { literal: &'a str, percent: bool },
    Operator(char),
    Paren(char),
}

impl Piece<'_> {
    fn is_percent(&self) -> bool {
        matches!(self, Self::Number { percent: true, .. })
    }
}

/// Length of a `(-digits[.digits])` or `(digits[.digits])` literal at `start`.
fn parenthesized_number_len(input: &str, start: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut pos = start + 1;
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }

    let end = scan_number(input, pos);
    if end == pos || bytes.get(end) != Some(&b')') {
        return None;
    }

    Some(end + 1 - start)
}

fn tokenize(input: &str) -> Result<Vec<Piece<'_>>, CalcError> {
    let bytes = input.as_bytes();
    let mut pieces: Vec<Piece<'_>> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let at_operand = matches!(
            pieces.last(),
            None | Some(Piece::Operator(_)) | Some(Piece::Paren('('))
        );

        let number_len = match bytes[pos] {
            b'(' => parenthesized_number_len(input, pos),
            b'0'..=b'9' | b'.' => Some(scan_number(input, pos) - pos),
            b'-' if at_operand
                && bytes
                    .get(pos + 1)
                    .is_some_and(|b| b.is_ascii_digit() || *b == b'.') =>
            {
                Some(scan_number(input, pos + 1) - pos)
            }
            _ => None,
        };

        if let Some(len) = number_len {
            let literal = &input[pos..pos + len];
            pos += len;
            let percent = bytes.get(pos) == Some(&b'%');
            if percent {
                pos += 1;
            }
            pieces.push(Piece::Number { literal, percent });
            continue;
        }

        let piece = match bytes[pos] {
            b @ (b'+' | b'-' | b'*' | b'/') => Piece::Operator(char::from(b)),
            b @ (b'(' | b')') => Piece::Paren(char::from(b)),
            _ => {
                let ch = input[pos..].chars().next().unwrap_or('\u{fffd}');
                return Err(CalcError::UnexpectedChar { ch, pos });
            }
        };
        pieces.push(piece);
        pos += 1;
    }

    Ok(pieces)
}

/// Rewrite every `<number>%` in an ASCII arithmetic expression.
pub fn transform_percent(expression: &str) -> Result<String, CalcError> {
    let pieces = tokenize(expression)?;
    let mut output = String::with_capacity(expression.len() * 2);

    // Value of the nearest number to the left, or the running value of a
    // percent chain.
    let mut operand: Option<String> = None;
    // Operator directly before the current token, with the operand before it.
    let mut pending: Option<(char, Option<String>)> = None;

    for (i, piece) in pieces.iter().enumerate() {
        match *piece {
            Piece::Operator(op) => {
                output.push(op);
                pending = Some((op, operand.clone()));
            }
            Piece::Paren(paren) => output.push(paren),
            Piece::Number {
                literal,
                percent: false,
            } => {
                output.push_str(literal);
                operand = Some(literal.to_string());
                pending = None;
            }
            Piece::Number {
                literal,
                percent: true,
            } => {
                let (rewritten, running) = match pending.take() {
                    Some((op @ ('+' | '-'), Some(base))) => {
                        let share = format!("({base}*{literal}/100)");
                        let running = format!("({base}{op}{share})");
                        (share, running)
                    }
                    _ => {
                        let fraction = format!("({literal}/100)");
                        (fraction.clone(), fraction)
                    }
                };
                output.push_str(&rewritten);

                let chained = matches!(pieces.get(i + 1), Some(Piece::Operator(_)))
                    && pieces.get(i + 2).is_some_and(Piece::is_percent);
                operand = Some(if chained { running } else { rewritten });
            }
        }
    }

    tracing::debug!(%expression, rewritten = %output, "Rewrote percent expression");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_base() {
        assert_eq!(transform_percent("100+10%").unwrap(), "100+(100*10/100)");
        assert_eq!(transform_percent("50-10%").unwrap(), "50-(50*10/100)");
    }

    #[test]
    fn test_bare_fraction() {
        assert_eq!(transform_percent("20%").unwrap(), "(20/100)");
        assert_eq!(transform_percent("200*10%").unwrap(), "200*(10/100)");
        assert_eq!(transform_percent("200/4%").unwrap(), "200/(4/100)");
    }

    #[test]
    fn test_parenthesized_numbers() {
        assert_eq!(transform_percent("(-5)%").unwrap(), "((-5)/100)");
        assert_eq!(
            transform_percent("(-200)+10%").unwrap(),
            "(-200)+((-200)*10/100)"
        );
        assert_eq!(transform_percent("3*(-5)+1%").unwrap(), "3*(-5)+((-5)*1/100)");
    }

    #[test]
    fn test_chained_percent() {
        assert_eq!(
            transform_percent("100+10%+10%").unwrap(),
            "100+(100*10/100)+((100+(100*10/100))*10/100)"
        );
        assert_eq!(
            transform_percent("10%+5%").unwrap(),
            "(10/100)+((10/100)*5/100)"
        );
    }

    #[test]
    fn test_unchained_percent_does_not_leak() {
        assert_eq!(
            transform_percent("100+10%+5+1%").unwrap(),
            "100+(100*10/100)+5+(5*1/100)"
        );
    }

    #[test]
    fn test_leading_negative_and_exponent() {
        assert_eq!(transform_percent("-5+10%").unwrap(), "-5+(-5*10/100)");
        assert_eq!(
            transform_percent("1.5e+13+10%").unwrap(),
            "1.5e+13+(1.5e+13*10/100)"
        );
    }

    #[test]
    fn test_unexpected_char() {
        assert!(matches!(
            transform_percent("5%×2"),
            Err(CalcError::UnexpectedChar { ch: '×', .. })
        ));
    }
}
