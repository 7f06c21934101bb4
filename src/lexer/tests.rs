#[cfg(test)]
use super::*;

#[test]
fn test_full_document_token_stream() {
    let input = "a.b-1: \"c\"\nd = 42\n";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Ident("a".into()),
        Token::Punct('.'),
        Token::Ident("b-1".into()),
        Token::Punct(':'),
        Token::String("\"c\"".into()),
        Token::Ident("d".into()),
        Token::Punct('='),
        Token::Int(42),
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token();
        assert_eq!(tok, Ok(expected));
    }
}

#[test]
fn test_whitespace_run_is_preserved() {
    let mut lexer = Lexer::new("foo  \tbar");

    assert_eq!(lexer.next_token(), Ok(Token::Ident("foo".into())));
    assert_eq!(lexer.whitespace(), "");

    assert_eq!(lexer.next_token(), Ok(Token::Ident("bar".into())));
    assert_eq!(lexer.whitespace(), "  \t");
}

#[test]
fn test_newline_advances_line_counter() {
    let mut lexer = Lexer::new("a\nb\n\nc");

    assert_eq!(lexer.next_token(), Ok(Token::Ident("a".into())));
    assert_eq!(lexer.line(), 1);

    assert_eq!(lexer.next_token(), Ok(Token::Ident("b".into())));
    assert_eq!(lexer.line(), 2);

    assert_eq!(lexer.next_token(), Ok(Token::Ident("c".into())));
    assert_eq!(lexer.line(), 4);
}

#[test]
fn test_column_tracking() {
    let mut lexer = Lexer::new("{.a:1}");

    assert_eq!(lexer.next_token(), Ok(Token::Punct('{')));
    assert_eq!((lexer.line(), lexer.column()), (1, 1));

    assert_eq!(lexer.next_token(), Ok(Token::Punct('.')));
    assert_eq!((lexer.line(), lexer.column()), (1, 2));
}

#[test]
fn test_numbers() {
    let mut lexer = Lexer::new("1 2.5 1e3 1.5e-2");

    assert_eq!(lexer.next_token(), Ok(Token::Int(1)));
    assert_eq!(lexer.next_token(), Ok(Token::Float(2.5)));
    assert_eq!(lexer.next_token(), Ok(Token::Float(1e3)));
    assert_eq!(lexer.next_token(), Ok(Token::Float(1.5e-2)));
}

#[test]
fn test_dot_after_integer_is_a_separate_token() {
    // `1.b` is a path expression, not a malformed float
    let mut lexer = Lexer::new("1.b");

    assert_eq!(lexer.next_token(), Ok(Token::Int(1)));
    assert_eq!(lexer.next_token(), Ok(Token::Punct('.')));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("b".into())));
}

#[test]
fn test_identifier_with_hyphen_and_leading_underscore() {
    let mut lexer = Lexer::new("_x b-1 -suffix");

    assert_eq!(lexer.next_token(), Ok(Token::Ident("_x".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("b-1".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("-suffix".into())));
}

#[test]
fn test_string_lexeme_keeps_quotes() {
    let mut lexer = Lexer::new("\"hello world\"");
    assert_eq!(lexer.next_token(), Ok(Token::String("\"hello world\"".into())));
}

#[test]
fn test_string_escapes() {
    let mut lexer = Lexer::new(r#""a\nb\t\\\"""#);
    assert_eq!(lexer.next_token(), Ok(Token::String("\"a\nb\t\\\"\"".into())));
}

#[test]
fn test_empty_string_and_multi_line_start() {
    let mut lexer = Lexer::new("\"\"\"abc\"\"\"");

    // the scanner stops after two quotes, the parser drives the rest
    assert_eq!(lexer.next_token(), Ok(Token::String("\"\"".into())));
    assert_eq!(lexer.peek_char(), Some('"'));
    assert_eq!(lexer.read_char(), Some('"'));
    assert_eq!(lexer.read_char(), Some('a'));
}

#[test]
fn test_double_slash_comment_is_skipped() {
    let mut lexer = Lexer::new("a // trailing comment\nb");

    assert_eq!(lexer.next_token(), Ok(Token::Ident("a".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("b".into())));
    assert_eq!(lexer.line(), 2);
}

#[test]
fn test_hash_is_a_token() {
    let mut lexer = Lexer::new("# not skipped here");
    assert_eq!(lexer.next_token(), Ok(Token::Punct('#')));
}

#[test]
fn test_substitution_marker_tokens() {
    let mut lexer = Lexer::new("${a.b}");

    assert_eq!(lexer.next_token(), Ok(Token::Punct('$')));
    assert_eq!(lexer.peek_char(), Some('{'));
    assert_eq!(lexer.next_token(), Ok(Token::Punct('{')));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("a".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Punct('.')));
    assert_eq!(lexer.next_token(), Ok(Token::Ident("b".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Punct('}')));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_integer_overflow_is_an_error() {
    let mut lexer = Lexer::new("99999999999999999999999999");
    assert!(lexer.next_token().is_err());
}
