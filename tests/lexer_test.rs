use proptest::prelude::*;

use blockrun::lexer::{Lexer, LexicalErrorKind, Token, TokenKind};

fn check(input: &str, expected: &[TokenKind]) {
    let mut scanner = Lexer::new(input);
    let mut kinds = Vec::new();
    loop {
        let token = scanner
            .next_token()
            .unwrap_or_else(|error| panic!("Failed to scan {input:?}: {error}"));
        kinds.push(token.kind);
        if matches!(token.kind, TokenKind::Eof) {
            break;
        }
    }
    assert_eq!(kinds, expected, "Failed to scan {input:?}");
}

#[test]
fn smoke_test() {
    check("", &[TokenKind::Eof]);
}

#[test]
fn test_arithmetic() {
    check(
        "(a + 10) % -b_2",
        &[
            TokenKind::LeftParenthesis,
            TokenKind::Ident,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::RightParenthesis,
            TokenKind::Percent,
            TokenKind::Minus,
            TokenKind::Ident,
            TokenKind::Eof,
        ],
    );
}

#[test]
fn test_digits_then_letters_split() {
    check("12ab", &[TokenKind::Number, TokenKind::Ident, TokenKind::Eof]);
}

#[test]
fn test_unrecognized_character() {
    let mut scanner = Lexer::new("1 == 2");
    assert_eq!(scanner.next_token().map(|token| token.kind), Ok(TokenKind::Number));
    let error = scanner.next_token().unwrap_err();
    assert_eq!(error.kind, LexicalErrorKind::Unrecognized('='));
    assert_eq!(error.span.start, 2);
}

#[test]
fn test_eof_sits_at_end_of_input() {
    let mut scanner = Lexer::new("x   ");
    scanner.next_token().unwrap();
    let eof = scanner.next_token().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.span.start, 4);
    assert_eq!(eof.span.length, 0);
}

// Property-based tests

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("%".to_string()),
    ]
}

fn numeric_literal_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,18}".prop_map(|s| s)
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]*".prop_map(|s: String| s)
}

fn token_sequence_strategy() -> impl Strategy<Value = Vec<String>> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![
            symbol_strategy(),
            numeric_literal_strategy(),
            identifier_strategy(),
        ],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
}

proptest! {
    #[test]
    fn lexer_handles_valid_tokens(input in token_sequence_strategy()) {
        // Add 1 to include EOF token
        let expected_num_tokens = input.len() + 1;
        let input = input.join(" ");
        let mut scanner = Lexer::new(&input);
        let mut num_tokens = 0;
        loop {
            num_tokens += 1;
            match scanner.next_token() {
                Ok(Token { kind: TokenKind::Eof, .. }) => {
                    break;
                },
                token => {
                    prop_assert!(token.is_ok());
                }
            }
        }
        prop_assert_eq!(num_tokens, expected_num_tokens);
    }

    #[test]
    fn lexemes_round_trip(input in token_sequence_strategy()) {
        let source = input.join(" ");
        let mut scanner = Lexer::new(&source);
        for expected in input.iter() {
            let token = scanner.next_token().unwrap();
            prop_assert_eq!(scanner.get_lexeme(&token.span), Some(expected.as_str()));
        }
    }
}
