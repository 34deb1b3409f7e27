//! Type designator parsing.

use kitec_lex::{TokenKind, TokenSource};
use kitec_util::{BuiltInType, Result, TypeSpec};

use crate::Parser;

impl<S: TokenSource> Parser<S> {
    /// Parses a type if the current token can begin one.
    ///
    /// `type = 'int' | 'float' | 'bool' | 'str' | ID`. Returns `Ok(None)`
    /// when the current token is not a type, leaving it unconsumed.
    pub(crate) fn parse_type_spec(&mut self) -> Result<Option<TypeSpec>> {
        let spec = match self.current.kind {
            TokenKind::Int => TypeSpec::BuiltIn(BuiltInType::Int),
            TokenKind::Float => TypeSpec::BuiltIn(BuiltInType::Float),
            TokenKind::Bool => TypeSpec::BuiltIn(BuiltInType::Bool),
            TokenKind::Str => TypeSpec::BuiltIn(BuiltInType::Str),
            TokenKind::Id => match self.current.text() {
                Some(name) => TypeSpec::Named(name.to_string()),
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
        self.advance()?;
        Ok(Some(spec))
    }

    /// Parses a type or fails with `message`.
    pub(crate) fn expect_type_spec(&mut self, message: &str) -> Result<TypeSpec> {
        match self.parse_type_spec()? {
            Some(spec) => Ok(spec),
            None => Err(self.syntax_error(message)),
        }
    }
}
