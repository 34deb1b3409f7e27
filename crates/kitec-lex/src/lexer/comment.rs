//! Line comment lexing.

use crate::token::{Token, TokenKind, TokenValue};
use crate::Lexer;

impl Lexer {
    /// Lexes a `#` comment running to the end of the line.
    ///
    /// The comment body (without `#` and without the newline) is kept as
    /// the token payload; the filter in front of the parser discards the
    /// whole token.
    pub(super) fn lex_comment(&mut self) -> Token {
        self.source.advance();

        let mut body = String::new();

        while let Some(c) = self.source.current() {
            if c == '\n' {
                break;
            }
            body.push(c);
            self.source.advance();
        }

        Token::new(TokenKind::Comment, TokenValue::Str(body), self.token_position)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::source::Source;
    use crate::token::{TokenKind, TokenValue};
    use crate::TokenSource;

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let mut lexer = Lexer::new(Source::new("# print 22;\n;"));
        let comment = lexer.next_token().unwrap();
        assert_eq!(comment.kind, TokenKind::Comment);
        assert_eq!(comment.value, TokenValue::Str(" print 22;".into()));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let mut lexer = Lexer::new(Source::new("#tail"));
        let comment = lexer.next_token().unwrap();
        assert_eq!(comment.value, TokenValue::Str("tail".into()));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Etx);
    }
}
