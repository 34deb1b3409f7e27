//! kitec-lex - Lexical analysis for Kite.
//!
//! This crate turns a character stream into a stream of [`Token`]s:
//!
//! - [`Source`] - single-lookahead character reader with line/column tracking
//! - [`Lexer`] - the hand-written scanner itself
//! - [`Filter`] - a [`TokenSource`] adapter that discards one token kind
//!   (the parser uses it to drop comments)
//!
//! The lexer is fail-fast: the first malformed construct aborts the scan
//! with a [`kitec_util::KiteError`] carrying the token's start position.
//! After the input is exhausted it keeps producing [`TokenKind::Etx`]
//! forever, so downstream phases never have to special-case "no more
//! tokens".

pub mod filter;
pub mod lexer;
pub mod source;
pub mod token;

pub use filter::Filter;
pub use lexer::Lexer;
pub use source::Source;
pub use token::{Token, TokenKind, TokenValue};

use kitec_util::Result;

/// Anything that can hand out tokens one at a time.
///
/// Implemented by [`Lexer`] and by [`Filter`], so the parser can run on a
/// filtered or unfiltered stream alike.
pub trait TokenSource {
    /// Produces the next token, or the error that ended the scan.
    fn next_token(&mut self) -> Result<Token>;
}
