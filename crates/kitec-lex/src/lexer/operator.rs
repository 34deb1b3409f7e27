//! Operator and punctuation lexing.

use kitec_util::{KiteError, Result};

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl Lexer {
    /// Consumes a single-character token.
    pub(super) fn lex_single(&mut self, kind: TokenKind) -> Token {
        self.source.advance();
        Token::bare(kind, self.token_position)
    }

    /// Lexes one of the `<`/`<=`, `>`/`>=`, `=`/`==` families: consumes the
    /// first character, then the second if it follows.
    pub(super) fn lex_one_or_two(
        &mut self,
        second: char,
        short: TokenKind,
        long: TokenKind,
    ) -> Token {
        self.source.advance();
        if self.source.current() == Some(second) {
            self.source.advance();
            Token::bare(long, self.token_position)
        } else {
            Token::bare(short, self.token_position)
        }
    }

    /// Lexes `!=`. A bare `!` is not a token of the language.
    pub(super) fn lex_not_equal(&mut self) -> Result<Token> {
        self.source.advance();
        if self.source.current() == Some('=') {
            self.source.advance();
            Ok(Token::bare(TokenKind::NotEqual, self.token_position))
        } else {
            Err(KiteError::InvalidToken {
                position: self.token_position,
                ch: '!',
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;
    use crate::TokenSource;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(Source::new(input));
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().expect("lexing failed");
            if token.kind == TokenKind::Etx {
                return kinds;
            }
            kinds.push(token.kind);
        }
    }

    #[test]
    fn test_two_character_families() {
        assert_eq!(
            kinds("< <= > >= = =="),
            vec![
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Assign,
                TokenKind::Equal,
            ]
        );
    }

    #[test]
    fn test_adjacent_operators_do_not_merge() {
        // `<==` is `<=` followed by `=`.
        assert_eq!(
            kinds("<=="),
            vec![TokenKind::LessEqual, TokenKind::Assign]
        );
    }

    #[test]
    fn test_not_equal_requires_the_equals_sign() {
        assert_eq!(kinds("!="), vec![TokenKind::NotEqual]);

        let mut lexer = Lexer::new(Source::new("! ="));
        assert!(matches!(
            lexer.next_token(),
            Err(KiteError::InvalidToken { ch: '!', .. })
        ));
    }

    #[test]
    fn test_arithmetic_and_punctuation() {
        assert_eq!(
            kinds("+-*/;,.(){}"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
            ]
        );
    }
}
