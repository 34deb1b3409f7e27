//! Identifier and keyword lexing.

use crate::token::{keyword_from_lexeme, Token, TokenKind, TokenValue};
use crate::Lexer;

impl Lexer {
    /// Lexes an identifier, keyword or boolean literal.
    ///
    /// The first character is known to be alphabetic; the rest of the
    /// lexeme is alphanumeric or `_`. Keywords are matched against the
    /// exact lexeme, so any uppercase letter keeps it an identifier.
    pub(super) fn lex_identifier(&mut self) -> Token {
        let mut lexeme = String::new();

        while let Some(c) = self.source.current() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            lexeme.push(c);
            self.source.advance();
        }

        match keyword_from_lexeme(&lexeme) {
            Some(kind) => Token::bare(kind, self.token_position),
            None => Token::new(TokenKind::Id, TokenValue::Str(lexeme), self.token_position),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::source::Source;
    use crate::token::{TokenKind, TokenValue};
    use crate::TokenSource;

    fn lex_one(input: &str) -> crate::Token {
        Lexer::new(Source::new(input)).next_token().unwrap()
    }

    #[test]
    fn test_plain_identifier() {
        let token = lex_one("valid_identifier_123");
        assert_eq!(token.kind, TokenKind::Id);
        assert_eq!(token.value, TokenValue::Str("valid_identifier_123".into()));
    }

    #[test]
    fn test_keyword_while() {
        let token = lex_one("while");
        assert_eq!(token.kind, TokenKind::While);
        assert_eq!(token.value, TokenValue::None);
    }

    #[test]
    fn test_booleans_lex_as_dedicated_kinds() {
        assert_eq!(lex_one("true").kind, TokenKind::TrueConst);
        assert_eq!(lex_one("false").kind, TokenKind::FalseConst);
    }

    #[test]
    fn test_capitalized_keyword_is_an_identifier() {
        let token = lex_one("While");
        assert_eq!(token.kind, TokenKind::Id);
        assert_eq!(token.value, TokenValue::Str("While".into()));
    }

    #[test]
    fn test_identifier_stops_before_punctuation() {
        let token = lex_one("foo(");
        assert_eq!(token.value, TokenValue::Str("foo".into()));
    }
}
