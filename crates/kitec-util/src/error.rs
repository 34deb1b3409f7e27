//! The error taxonomy of the toolchain.
//!
//! Every failure the lexer, parser or interpreter can produce is a variant
//! of [`KiteError`]. None of them are recoverable inside the core: once
//! raised, an error propagates out of every scope and call context to the
//! driver, which renders it on stderr. Each variant carries the [`Position`]
//! most relevant to the user - the token start for lexical errors, the
//! offending node's position for the rest.

use thiserror::Error;

use crate::position::Position;

/// Result alias used across the toolchain.
pub type Result<T> = std::result::Result<T, KiteError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum KiteError {
    // Lexical errors.
    #[error("unknown token starting with '{ch}' at {position}")]
    InvalidToken { position: Position, ch: char },

    #[error("end of input while reading string literal at {position}")]
    NotTerminatedStrConst { position: Position },

    #[error("'{ch}' cannot be escaped with '\\' at {position}")]
    NonEscapableChar { position: Position, ch: char },

    #[error("numeric literal overflows at {position}: {value} * 10 + {digit} exceeds 4294967295")]
    NumericOverflow {
        position: Position,
        value: u32,
        digit: u32,
    },

    #[error("expected digit after '.' in float literal at {position}")]
    InvalidFloat { position: Position },

    // Syntactic errors.
    #[error("syntax error at {position}: {message}")]
    SyntaxError { position: Position, message: String },

    // Runtime errors.
    #[error("{kind} {name} not found at {position}")]
    SymbolNotFound {
        position: Position,
        kind: &'static str,
        name: String,
    },

    #[error("type mismatch at {position}: expected {expected}, got {actual}")]
    TypeMismatch {
        position: Position,
        expected: String,
        actual: String,
    },

    #[error("return type mismatch at {position}: expected {expected}, got {actual}")]
    ReturnTypeMismatch {
        position: Position,
        expected: String,
        actual: String,
    },

    #[error("expected {expected} fields but {actual} were given at {position}")]
    InvalidFieldCount {
        position: Position,
        expected: usize,
        actual: usize,
    },

    #[error("no field named {field} at {position}")]
    InvalidField { position: Position, field: String },

    #[error("redefinition of variable {name} at {position}")]
    VariableRedefinition { position: Position, name: String },

    #[error("redefinition of function {name} at {position}")]
    FunctionRedefinition { position: Position, name: String },

    #[error("redefinition of struct {name} at {position}")]
    StructRedefinition { position: Position, name: String },

    #[error("redefinition of variant {name} at {position}")]
    VariantRedefinition { position: Position, name: String },

    #[error("cannot convert from {from} to {to} at {position}")]
    InvalidTypeConversion {
        position: Position,
        from: String,
        to: String,
    },

    #[error("assignment to const at {position}")]
    ConstViolation { position: Position },

    #[error("maximum recursion depth reached at {position}")]
    MaxRecursionDepth { position: Position },

    #[error("division by zero at {position}")]
    DivisionByZero { position: Position },
}

impl KiteError {
    /// The source position the error points at.
    pub fn position(&self) -> Position {
        match self {
            KiteError::InvalidToken { position, .. }
            | KiteError::NotTerminatedStrConst { position }
            | KiteError::NonEscapableChar { position, .. }
            | KiteError::NumericOverflow { position, .. }
            | KiteError::InvalidFloat { position }
            | KiteError::SyntaxError { position, .. }
            | KiteError::SymbolNotFound { position, .. }
            | KiteError::TypeMismatch { position, .. }
            | KiteError::ReturnTypeMismatch { position, .. }
            | KiteError::InvalidFieldCount { position, .. }
            | KiteError::InvalidField { position, .. }
            | KiteError::VariableRedefinition { position, .. }
            | KiteError::FunctionRedefinition { position, .. }
            | KiteError::StructRedefinition { position, .. }
            | KiteError::VariantRedefinition { position, .. }
            | KiteError::InvalidTypeConversion { position, .. }
            | KiteError::ConstViolation { position }
            | KiteError::MaxRecursionDepth { position }
            | KiteError::DivisionByZero { position } => *position,
        }
    }

    /// Shorthand for a [`KiteError::SyntaxError`].
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        KiteError::SyntaxError {
            position,
            message: message.into(),
        }
    }

    /// Shorthand for a [`KiteError::TypeMismatch`].
    pub fn type_mismatch(
        position: Position,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        KiteError::TypeMismatch {
            position,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_positions() {
        let err = KiteError::InvalidToken {
            position: Position::new(2, 7),
            ch: '&',
        };
        assert_eq!(err.to_string(), "unknown token starting with '&' at 2:7");
        assert_eq!(err.position(), Position::new(2, 7));
    }

    #[test]
    fn test_overflow_message_names_the_limit() {
        let err = KiteError::NumericOverflow {
            position: Position::new(1, 1),
            value: 429496729,
            digit: 6,
        };
        assert!(err.to_string().contains("429496729 * 10 + 6"));
        assert!(err.to_string().contains("4294967295"));
    }

    #[test]
    fn test_type_mismatch_helper_renders_types() {
        let err = KiteError::type_mismatch(Position::new(1, 5), "BOOL", "INT");
        assert_eq!(err.to_string(), "type mismatch at 1:5: expected BOOL, got INT");
    }
}
