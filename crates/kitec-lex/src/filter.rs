//! Token filter.

use kitec_util::Result;

use crate::token::{Token, TokenKind};
use crate::TokenSource;

/// A [`TokenSource`] adapter that discards every token of one kind.
///
/// The parser runs on `Filter::new(lexer, TokenKind::Comment)` so comments
/// never reach the grammar. Filtering out `Etx` would spin forever on an
/// exhausted input, so it is rejected up front.
pub struct Filter<S: TokenSource> {
    inner: S,
    ignore: TokenKind,
}

impl<S: TokenSource> Filter<S> {
    /// Wraps `inner`, discarding tokens of kind `ignore`.
    ///
    /// # Panics
    ///
    /// Panics if `ignore` is [`TokenKind::Etx`].
    pub fn new(inner: S, ignore: TokenKind) -> Self {
        assert!(
            ignore != TokenKind::Etx,
            "cannot filter out end-of-text tokens"
        );
        Self { inner, ignore }
    }
}

impl<S: TokenSource> TokenSource for Filter<S> {
    fn next_token(&mut self) -> Result<Token> {
        loop {
            let token = self.inner.next_token()?;
            if token.kind != self.ignore {
                return Ok(token);
            }
        }
    }
}
