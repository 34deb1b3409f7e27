//! String literal lexing.

use kitec_util::{KiteError, Result};

use crate::token::{Token, TokenKind, TokenValue};
use crate::Lexer;

impl Lexer {
    /// Lexes a string literal, decoding escape sequences.
    ///
    /// The opening `"` has been seen but not consumed. Only `\n`, `\t`,
    /// `\"` and `\\` are escapable; anything else after a backslash is a
    /// `NonEscapableChar` error. Reaching end of input before the closing
    /// quote is `NotTerminatedStrConst`. Raw newlines inside the literal
    /// are allowed.
    pub(super) fn lex_string(&mut self) -> Result<Token> {
        self.source.advance();

        let mut content = String::new();

        loop {
            let Some(c) = self.source.current() else {
                return Err(KiteError::NotTerminatedStrConst {
                    position: self.token_position,
                });
            };

            if c == '"' {
                self.source.advance();
                break;
            }

            let decoded = if c == '\\' {
                self.source.advance();
                let Some(escaped) = self.source.current() else {
                    return Err(KiteError::NotTerminatedStrConst {
                        position: self.token_position,
                    });
                };
                self.decode_escape(escaped)?
            } else {
                c
            };

            content.push(decoded);
            self.source.advance();
        }

        Ok(Token::new(
            TokenKind::StrConst,
            TokenValue::Str(content),
            self.token_position,
        ))
    }

    fn decode_escape(&self, escaped: char) -> Result<char> {
        match escaped {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            ch => Err(KiteError::NonEscapableChar {
                position: self.token_position,
                ch,
            }),
        }
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

    fn str_value(input: &str) -> String {
        match lex_one(input).unwrap().value {
            TokenValue::Str(s) => s,
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_string() {
        assert_eq!(str_value("\"hello\""), "hello");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(str_value("\"\""), "");
    }

    #[test]
    fn test_escapes_are_decoded() {
        assert_eq!(
            str_value(r#""Hello\n\"world\"""#),
            "Hello\n\"world\""
        );
        assert_eq!(str_value(r#""a\tb\\c""#), "a\tb\\c");
    }

    #[test]
    fn test_unterminated_string_is_rejected() {
        assert!(matches!(
            lex_one("\"abc"),
            Err(KiteError::NotTerminatedStrConst { .. })
        ));
    }

    #[test]
    fn test_trailing_backslash_is_rejected() {
        assert!(matches!(
            lex_one("\"abc\\"),
            Err(KiteError::NotTerminatedStrConst { .. })
        ));
    }

    #[test]
    fn test_unknown_escape_is_rejected() {
        assert!(matches!(
            lex_one(r#""a\qb""#),
            Err(KiteError::NonEscapableChar { ch: 'q', .. })
        ));
    }
}
