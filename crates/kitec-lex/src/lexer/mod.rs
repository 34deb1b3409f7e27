//! Lexer module.
//!
//! The scanner is split into focused pieces:
//! - this file - the `Lexer` struct, whitespace handling and dispatch
//! - `identifier` - identifiers and keywords
//! - `number` - integer and float literals with overflow checking
//! - `string` - string literals and escape sequences
//! - `comment` - `#` line comments
//! - `operator` - punctuation and one/two-character operators

mod comment;
mod identifier;
mod number;
mod operator;
mod string;

use kitec_util::{KiteError, Position, Result};

use crate::source::Source;
use crate::token::{Token, TokenKind};
use crate::TokenSource;

/// The Kite scanner.
///
/// Each [`Lexer::next_token`] call skips leading whitespace, pins the token
/// position to the first significant character and dispatches on it. An
/// unrecognized first character (or a `!` without `=`) aborts the scan.
pub struct Lexer {
    source: Source,

    /// Position of the first character of the token being built.
    token_position: Position,
}

impl Lexer {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            token_position: Position::default(),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.source.current(), Some(c) if c.is_ascii_whitespace()) {
            self.source.advance();
        }
    }

    fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.token_position = self.source.position();

        let Some(c) = self.source.current() else {
            return Ok(Token::bare(TokenKind::Etx, self.token_position));
        };

        match c {
            c if c.is_ascii_alphabetic() => Ok(self.lex_identifier()),
            c if c.is_ascii_digit() => self.lex_number(),
            '"' => self.lex_string(),
            '#' => Ok(self.lex_comment()),
            '!' => self.lex_not_equal(),

            ';' => Ok(self.lex_single(TokenKind::Semicolon)),
            ',' => Ok(self.lex_single(TokenKind::Comma)),
            '.' => Ok(self.lex_single(TokenKind::Dot)),
            '+' => Ok(self.lex_single(TokenKind::Plus)),
            '-' => Ok(self.lex_single(TokenKind::Minus)),
            '*' => Ok(self.lex_single(TokenKind::Star)),
            '/' => Ok(self.lex_single(TokenKind::Slash)),
            '(' => Ok(self.lex_single(TokenKind::LParen)),
            ')' => Ok(self.lex_single(TokenKind::RParen)),
            '{' => Ok(self.lex_single(TokenKind::LBrace)),
            '}' => Ok(self.lex_single(TokenKind::RBrace)),

            '<' => Ok(self.lex_one_or_two('=', TokenKind::Less, TokenKind::LessEqual)),
            '>' => Ok(self.lex_one_or_two('=', TokenKind::Greater, TokenKind::GreaterEqual)),
            '=' => Ok(self.lex_one_or_two('=', TokenKind::Assign, TokenKind::Equal)),

            ch => Err(KiteError::InvalidToken {
                position: self.token_position,
                ch,
            }),
        }
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token> {
        self.scan_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenValue;

    fn lexer(input: &str) -> Lexer {
        Lexer::new(Source::new(input))
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = lexer(input);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().expect("lexing failed");
            let done = token.kind == TokenKind::Etx;
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        kinds
    }

    #[test]
    fn test_empty_input_yields_etx() {
        assert_eq!(kinds(""), vec![TokenKind::Etx]);
    }

    #[test]
    fn test_etx_repeats_after_exhaustion() {
        let mut lexer = lexer("a");
        lexer.next_token().unwrap();
        for _ in 0..5 {
            assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Etx);
        }
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(
            kinds("  \t\r\n  ;"),
            vec![TokenKind::Semicolon, TokenKind::Etx]
        );
    }

    #[test]
    fn test_token_positions_point_at_first_characters() {
        let mut lexer = lexer("if x\n  42;");
        let if_kw = lexer.next_token().unwrap();
        assert_eq!(if_kw.position, Position::new(1, 1));
        let x = lexer.next_token().unwrap();
        assert_eq!(x.position, Position::new(1, 4));
        let n = lexer.next_token().unwrap();
        assert_eq!(n.position, Position::new(2, 3));
        let semi = lexer.next_token().unwrap();
        assert_eq!(semi.position, Position::new(2, 5));
    }

    #[test]
    fn test_unknown_character_is_rejected_with_its_position() {
        let mut lexer = lexer("  &324");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(
            err,
            KiteError::InvalidToken {
                position: Position::new(1, 3),
                ch: '&'
            }
        );
    }

    #[test]
    fn test_a_small_program_lexes_end_to_end() {
        assert_eq!(
            kinds("int i = 3 + 2;"),
            vec![
                TokenKind::Int,
                TokenKind::Id,
                TokenKind::Assign,
                TokenKind::IntConst,
                TokenKind::Plus,
                TokenKind::IntConst,
                TokenKind::Semicolon,
                TokenKind::Etx,
            ]
        );
    }

    #[test]
    fn test_string_token_carries_its_value() {
        let mut lexer = lexer("\"hi\"");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::StrConst);
        assert_eq!(token.value, TokenValue::Str("hi".into()));
    }
}
