//! Property-based tests for the lexer and token stream.
//!
//! Inputs are assembled from Swift-shaped fragments so that most of them
//! tokenize successfully while still hitting nesting, strings, comments and
//! operators in arbitrary combinations.

use proptest::prelude::*;
use restyle_core::{
    source_text, tokenize, tokenize_lossy, LexOptions, Token, TokenStream,
};

const FRAGMENTS: &[&str] = &[
    "let", " ", "\n", "x", "foo", "(", ")", "[", "]", "{", "}", "<", ">", "\"",
    "\"\"\"", "#", "//", "/*", "*/", "\\(", "=", "+", "-", "->", "?", "!", ".",
    ",", ":", ";", "0x1F", "1.5e3", "@objc", "#if", "#endif", "`class`", "$0",
    "\t", "é", "\r\n", "<<<<<<<",
];

fn swiftish() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.concat())
}

/// Balanced inputs that always tokenize.
fn balanced() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["a", "b + c", "f(x)", "\"s\"", "1", "x?.y", "!z"])
        .prop_map(str::to_string);
    let interpolated = leaf.clone().prop_map(|s| format!("\"a\\({s})b\""));
    leaf.prop_recursive(4, 32, 4, move |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| format!("({s})")),
            inner.clone().prop_map(|s| format!("[{s}]")),
            inner.clone().prop_map(|s| format!("{{ {s} }}")),
            interpolated.clone(),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}\n{b}")),
            (inner.clone(), inner).prop_map(|(a, b)| format!("{a}, {b}")),
        ]
    })
}

proptest! {
    #[test]
    fn lossy_tokenization_is_lossless(source in swiftish()) {
        let tokens = tokenize_lossy(&source);
        prop_assert_eq!(source_text(&tokens), source);
    }

    #[test]
    fn successful_tokenization_is_lossless(source in swiftish()) {
        if let Ok(tokens) = tokenize(&source, LexOptions::default()) {
            prop_assert_eq!(source_text(&tokens), source);
        }
    }

    #[test]
    fn fragments_are_lossless(source in swiftish()) {
        if let Ok(tokens) = tokenize(&source, LexOptions::fragment()) {
            prop_assert_eq!(source_text(&tokens), source);
        }
    }

    #[test]
    fn scopes_pair_up(source in balanced()) {
        let tokens = tokenize(&source, LexOptions::default()).unwrap();
        let stream = TokenStream::new(tokens);
        for (i, token) in stream.tokens().iter().enumerate() {
            if token.is_start_of_scope() && !token.is_start("//") {
                let end = stream.end_of_scope(i);
                prop_assert!(end.is_some(), "unclosed {:?} at {}", token, i);
                prop_assert_eq!(stream.start_of_scope(end.unwrap_or(i)), Some(i));
            }
        }
    }

    #[test]
    fn removal_during_enumeration_visits_each_token_once(keep in prop::collection::vec(any::<bool>(), 1..30)) {
        let tokens: Vec<Token> = (0..keep.len())
            .map(|i| Token::identifier(format!("t{i}")))
            .collect();
        let mut stream = TokenStream::new(tokens);
        let mut visited = Vec::new();
        stream.for_each(|t| matches!(t, Token::Identifier(_)), |stream, i, token| {
            let n: usize = token.text()[1..].parse().unwrap_or(usize::MAX);
            visited.push(n);
            if !keep[n] {
                stream.remove_token(i);
            }
            Ok::<_, ()>(())
        }).unwrap();

        prop_assert_eq!(visited, (0..keep.len()).collect::<Vec<_>>());
        let expected: String = (0..keep.len())
            .filter(|&i| keep[i])
            .map(|i| format!("t{i}"))
            .collect();
        prop_assert_eq!(stream.text(), expected);
    }

    #[test]
    fn insertion_before_cursor_is_not_revisited(len in 1usize..20) {
        let tokens: Vec<Token> = (0..len).map(|_| Token::identifier("a")).collect();
        let mut stream = TokenStream::new(tokens);
        let mut visits = 0;
        stream.for_each(|t| t.is_identifier("a"), |stream, i, _| {
            visits += 1;
            stream.insert_token(i, Token::identifier("a"));
            Ok::<_, ()>(())
        }).unwrap();
        prop_assert_eq!(visits, len);
        prop_assert_eq!(stream.len(), len * 2);
    }
}

#[test]
fn unterminated_scope_reports_position() {
    let err = tokenize("func foo() {", LexOptions::default()).unwrap_err();
    assert_eq!((err.line, err.column), (1, 13));
    assert!(tokenize("func foo() {", LexOptions::fragment()).is_ok());
}
