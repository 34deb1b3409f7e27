//! Type designators shared by the parser and the interpreter.

use std::fmt;

/// One of the four built-in scalar types.
///
/// `Int` is an unsigned 32-bit integer and `Float` is IEEE single-precision;
/// the language has no wider numeric types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltInType {
    Int,
    Float,
    Bool,
    Str,
}

impl fmt::Display for BuiltInType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuiltInType::Int => "INT",
            BuiltInType::Float => "FLOAT",
            BuiltInType::Bool => "BOOL",
            BuiltInType::Str => "STR",
        };
        f.write_str(name)
    }
}

/// A type as written in source: a built-in scalar or the name of a
/// user-defined struct or variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSpec {
    BuiltIn(BuiltInType),
    Named(String),
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::BuiltIn(ty) => ty.fmt(f),
            TypeSpec::Named(name) => f.write_str(name),
        }
    }
}

/// A function return type. `Void` is only valid here, never as a variable
/// or parameter type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetType {
    Value(TypeSpec),
    Void,
}

impl fmt::Display for RetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetType::Value(spec) => spec.fmt(f),
            RetType::Void => f.write_str("VOID"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_are_uppercase() {
        assert_eq!(BuiltInType::Int.to_string(), "INT");
        assert_eq!(BuiltInType::Str.to_string(), "STR");
    }

    #[test]
    fn test_named_types_display_verbatim() {
        assert_eq!(TypeSpec::Named("Point".into()).to_string(), "Point");
        assert_eq!(RetType::Void.to_string(), "VOID");
    }
}
