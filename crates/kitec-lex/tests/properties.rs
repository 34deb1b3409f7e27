//! Property-based tests for the lexer.

use proptest::prelude::*;

use kitec_lex::{Filter, Lexer, Source, Token, TokenKind, TokenSource, TokenValue};

/// Drains the lexer into a token list, stopping at `Etx` or an error.
fn lex_all(input: &str) -> Result<Vec<Token>, kitec_util::KiteError> {
    let mut lexer = Lexer::new(Source::new(input));
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::Etx {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

proptest! {
    /// Every u32 round-trips through its decimal rendering.
    #[test]
    fn test_integer_literals_round_trip(n: u32) {
        let tokens = lex_all(&n.to_string()).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::IntConst);
        prop_assert_eq!(&tokens[0].value, &TokenValue::Int(n));
    }

    /// Identifiers that are not reserved words round-trip verbatim.
    #[test]
    fn test_identifiers_round_trip(name in "[A-Z][a-zA-Z0-9_]{0,20}") {
        // Starting with an uppercase letter guarantees it is not a keyword.
        let tokens = lex_all(&name).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Id);
        prop_assert_eq!(&tokens[0].value, &TokenValue::Str(name));
    }

    /// The lexer terminates on arbitrary ASCII input: it either errors or
    /// reaches end of text, and never panics.
    #[test]
    fn test_lexing_always_terminates(input in "[ -~\t\n]{0,200}") {
        let _ = lex_all(&input);
    }

    /// Tokenization is insensitive to the amount of whitespace between
    /// tokens.
    #[test]
    fn test_whitespace_between_tokens_is_irrelevant(
        pads in proptest::collection::vec(" |\t|\n|\r", 4),
    ) {
        let spaced = format!(
            "{}int{}x{}={}1;",
            pads[0], pads[1], pads[2], pads[3]
        );
        let dense_kinds: Vec<_> = lex_all("int x = 1;")
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        let spaced_kinds: Vec<_> = lex_all(&spaced)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        prop_assert_eq!(dense_kinds, spaced_kinds);
    }

    /// Comments never survive the filter.
    #[test]
    fn test_filtered_streams_contain_no_comments(body in "[ -~]{0,40}") {
        let input = format!("print 1; #{body}\nprint 2;");
        let lexer = Lexer::new(Source::new(input.as_str()));
        let mut filter = Filter::new(lexer, TokenKind::Comment);
        loop {
            let token = filter.next_token().unwrap();
            prop_assert_ne!(token.kind, TokenKind::Comment);
            if token.kind == TokenKind::Etx {
                break;
            }
        }
    }
}
