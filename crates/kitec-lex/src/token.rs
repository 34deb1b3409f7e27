//! Token definitions.

use std::sync::OnceLock;

use kitec_util::Position;
use rustc_hash::FxHashMap;

/// The closed set of token kinds the lexer can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords. All of them are reserved in lowercase form only; a lexeme
    // containing any uppercase letter is an ordinary identifier.
    If,
    While,
    Return,
    Print,
    Const,
    Ref,
    Struct,
    Variant,
    Or,
    And,
    Not,
    As,
    Is,
    Void,
    Int,
    Float,
    Bool,
    Str,

    // Literals.
    IntConst,
    FloatConst,
    TrueConst,
    FalseConst,
    StrConst,

    /// Identifier.
    Id,

    /// `#` line comment carrying its body.
    Comment,

    /// End of text. Returned forever once the input is exhausted.
    Etx,

    // Punctuation.
    Semicolon,
    Comma,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Operators.
    Assign,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
}

/// Payload attached to a token. Most tokens carry no value.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    None,
    Int(u32),
    Float(f32),
    Bool(bool),
    Str(String),
}

/// A lexical unit: kind, optional payload and the position of its first
/// character.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, position: Position) -> Self {
        Self {
            kind,
            value,
            position,
        }
    }

    /// A token with no payload.
    pub fn bare(kind: TokenKind, position: Position) -> Self {
        Self::new(kind, TokenValue::None, position)
    }

    /// The payload string of an `Id`, `StrConst` or `Comment` token.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Str(text) => Some(text),
            _ => None,
        }
    }
}

fn keyword_table() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        FxHashMap::from_iter([
            ("if", TokenKind::If),
            ("while", TokenKind::While),
            ("return", TokenKind::Return),
            ("print", TokenKind::Print),
            ("const", TokenKind::Const),
            ("ref", TokenKind::Ref),
            ("struct", TokenKind::Struct),
            ("variant", TokenKind::Variant),
            ("or", TokenKind::Or),
            ("and", TokenKind::And),
            ("not", TokenKind::Not),
            ("as", TokenKind::As),
            ("is", TokenKind::Is),
            ("void", TokenKind::Void),
            ("int", TokenKind::Int),
            ("float", TokenKind::Float),
            ("bool", TokenKind::Bool),
            ("str", TokenKind::Str),
        ])
    })
}

/// Looks up the keyword (or boolean literal) kind for an identifier lexeme.
///
/// The table holds lowercase entries only, so `While` or `True` fall
/// through to `None` and lex as identifiers.
pub fn keyword_from_lexeme(lexeme: &str) -> Option<TokenKind> {
    match lexeme {
        "true" => Some(TokenKind::TrueConst),
        "false" => Some(TokenKind::FalseConst),
        _ => keyword_table().get(lexeme).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_recognized() {
        assert_eq!(keyword_from_lexeme("while"), Some(TokenKind::While));
        assert_eq!(keyword_from_lexeme("variant"), Some(TokenKind::Variant));
        assert_eq!(keyword_from_lexeme("str"), Some(TokenKind::Str));
    }

    #[test]
    fn test_booleans_have_their_own_kinds() {
        assert_eq!(keyword_from_lexeme("true"), Some(TokenKind::TrueConst));
        assert_eq!(keyword_from_lexeme("false"), Some(TokenKind::FalseConst));
    }

    #[test]
    fn test_uppercase_lexemes_are_not_keywords() {
        assert_eq!(keyword_from_lexeme("While"), None);
        assert_eq!(keyword_from_lexeme("TRUE"), None);
    }
}
