//! kitec-par - Recursive-descent parser for Kite.
//!
//! The parser consumes a [`TokenSource`] (normally a comment-stripping
//! [`kitec_lex::Filter`]) with exactly one token of lookahead and produces
//! the [`ast::Program`] syntax tree. Operator precedence is encoded by the
//! nesting of the expression methods in `expr`; the comparison and
//! relational levels are non-associative, so `a == b == c` is a syntax
//! error. The grammar is deterministic except for statements that begin
//! with an identifier, which are disambiguated on the single lookahead
//! token (`=`/`.` assignment, `ID` definition, `(` call).

pub mod ast;
mod expr;
mod stmt;
mod types;

use kitec_lex::{Token, TokenKind, TokenSource};
use kitec_util::{KiteError, Position, Result};

use ast::{Program, Stmt};

/// The Kite parser.
pub struct Parser<S: TokenSource> {
    tokens: S,
    current: Token,
}

impl<S: TokenSource> Parser<S> {
    /// Creates a parser and primes the lookahead token.
    pub fn new(mut tokens: S) -> Result<Self> {
        let current = tokens.next_token()?;
        Ok(Self { tokens, current })
    }

    /// Parses a whole program: statements up to end of text.
    ///
    /// Any token that cannot begin a statement (other than end of text) is
    /// a syntax error.
    pub fn parse_program(mut self) -> Result<Program> {
        let mut statements = Vec::new();

        while let Some(stmt) = self.parse_statement()? {
            statements.push(stmt);
        }

        if self.current.kind != TokenKind::Etx {
            return Err(self.syntax_error("expected a statement"));
        }

        Ok(Program { statements })
    }

    /// Parses a brace-delimited statement list.
    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect(TokenKind::LBrace, "missing '{'")?;

        let mut statements = Vec::new();
        while let Some(stmt) = self.parse_statement()? {
            statements.push(stmt);
        }

        self.expect(TokenKind::RBrace, "missing '}'")?;
        Ok(statements)
    }

    // Lookahead helpers.

    fn position(&self) -> Position {
        self.current.position
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.tokens.next_token()?;
        Ok(())
    }

    /// Consumes the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes a token of the given kind or fails with `message`.
    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<()> {
        if !self.check(kind) {
            return Err(self.syntax_error(message));
        }
        self.advance()
    }

    /// Consumes an identifier token and returns its name and position.
    fn take_id(&mut self, message: &str) -> Result<(String, Position)> {
        if !self.check(TokenKind::Id) {
            return Err(self.syntax_error(message));
        }
        let position = self.current.position;
        let name = self.current.text().unwrap_or_default().to_string();
        self.advance()?;
        Ok((name, position))
    }

    /// A syntax error at the current token.
    fn syntax_error(&self, message: &str) -> KiteError {
        KiteError::syntax(self.current.position, message)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use kitec_lex::{Filter, Lexer, Source};

    /// Parses a source string through the full lexer + filter + parser
    /// pipeline.
    pub fn parse(input: &str) -> Result<Program> {
        let lexer = Lexer::new(Source::new(input));
        let filter = Filter::new(lexer, TokenKind::Comment);
        Parser::new(filter)?.parse_program()
    }

    /// Parses a program expected to be well-formed.
    pub fn parse_ok(input: &str) -> Program {
        parse(input).expect("program should parse")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{parse, parse_ok};
    use super::*;

    #[test]
    fn test_empty_program() {
        assert_eq!(parse_ok("").statements.len(), 0);
    }

    #[test]
    fn test_comment_only_program() {
        assert_eq!(parse_ok("# just a comment").statements.len(), 0);
    }

    #[test]
    fn test_statements_accumulate_in_order() {
        let program = parse_ok("print 1; print 2; print 3;");
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn test_stray_token_at_top_level_is_rejected() {
        let err = parse("print 1; )").unwrap_err();
        assert!(matches!(err, KiteError::SyntaxError { .. }));
        assert_eq!(err.position(), Position::new(1, 10));
    }

    #[test]
    fn test_lexical_errors_propagate_through_the_parser() {
        let err = parse("int i = @;").unwrap_err();
        assert!(matches!(err, KiteError::InvalidToken { ch: '@', .. }));
    }
}
