//! Number literal lexing.
//!
//! Integers are unsigned 32-bit values accumulated digit by digit; every
//! step checks `10 * value + digit` against `u32::MAX` and aborts with
//! `NumericOverflow` when it would exceed it. The same accumulator handles
//! the fractional part of floats, so a fraction longer than the integer
//! range overflows even when the final `f32` could represent it.

use kitec_util::{KiteError, Result};

use crate::token::{Token, TokenKind, TokenValue};
use crate::Lexer;

impl Lexer {
    /// Lexes an integer or float literal.
    ///
    /// A leading `0` is a complete integer unless a `.` follows: `01234`
    /// lexes as `0` and then `1234`.
    pub(super) fn lex_number(&mut self) -> Result<Token> {
        if self.source.current() == Some('0') {
            self.source.advance();

            if self.source.current() == Some('.') {
                return self.lex_float(0);
            }

            return Ok(Token::new(
                TokenKind::IntConst,
                TokenValue::Int(0),
                self.token_position,
            ));
        }

        let (value, _) = self.lex_digits()?;

        if self.source.current() == Some('.') {
            return self.lex_float(value);
        }

        Ok(Token::new(
            TokenKind::IntConst,
            TokenValue::Int(value),
            self.token_position,
        ))
    }

    /// Lexes the fractional part after the `.` of a float literal.
    fn lex_float(&mut self, integral: u32) -> Result<Token> {
        self.source.advance();

        if !matches!(self.source.current(), Some(c) if c.is_ascii_digit()) {
            return Err(KiteError::InvalidFloat {
                position: self.token_position,
            });
        }

        let (fraction, digit_count) = self.lex_digits()?;
        let value = integral as f32 + fraction as f32 * 10f32.powi(-(digit_count as i32));

        Ok(Token::new(
            TokenKind::FloatConst,
            TokenValue::Float(value),
            self.token_position,
        ))
    }

    /// Accumulates a run of digits, returning the value and the digit
    /// count.
    fn lex_digits(&mut self) -> Result<(u32, u32)> {
        let mut value: u32 = 0;
        let mut digit_count: u32 = 0;

        while let Some(c) = self.source.current() {
            let Some(digit) = c.to_digit(10) else {
                break;
            };
            if value > (u32::MAX - digit) / 10 {
                return Err(KiteError::NumericOverflow {
                    position: self.token_position,
                    value,
                    digit,
                });
            }
            value = 10 * value + digit;
            digit_count += 1;
            self.source.advance();
        }

        Ok((value, digit_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;
    use crate::TokenSource;

    fn lex_one(input: &str) -> Result<Token> {
        Lexer::new(Source::new(input)).next_token()
    }

    fn int_value(input: &str) -> u32 {
        match lex_one(input).unwrap().value {
            TokenValue::Int(n) => n,
            other => panic!("expected int, got {other:?}"),
        }
    }

    fn float_value(input: &str) -> f32 {
        match lex_one(input).unwrap().value {
            TokenValue::Float(f) => f,
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_decimal_integer() {
        assert_eq!(int_value("1234"), 1234);
        assert_eq!(int_value("0"), 0);
    }

    #[test]
    fn test_leading_zero_splits_the_literal() {
        let mut lexer = Lexer::new(Source::new("01234"));
        let first = lexer.next_token().unwrap();
        let second = lexer.next_token().unwrap();
        assert_eq!(first.value, TokenValue::Int(0));
        assert_eq!(second.value, TokenValue::Int(1234));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Etx);
    }

    #[test]
    fn test_integer_at_the_limit_is_accepted() {
        assert_eq!(int_value("4294967295"), u32::MAX);
    }

    #[test]
    fn test_integer_past_the_limit_overflows() {
        assert!(matches!(
            lex_one("4294967296"),
            Err(KiteError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn test_simple_float() {
        assert_eq!(float_value("12.125"), 12.125);
        assert_eq!(float_value("0.5"), 0.5);
    }

    #[test]
    fn test_float_without_fraction_digits_is_invalid() {
        assert!(matches!(lex_one("1."), Err(KiteError::InvalidFloat { .. })));
        assert!(matches!(
            lex_one("1..125"),
            Err(KiteError::InvalidFloat { .. })
        ));
    }

    #[test]
    fn test_fraction_at_the_accumulator_limit_is_accepted() {
        assert!(lex_one("0.4294967295").is_ok());
    }

    #[test]
    fn test_fraction_past_the_accumulator_limit_overflows() {
        assert!(matches!(
            lex_one("0.4294967296"),
            Err(KiteError::NumericOverflow { .. })
        ));
    }
}
