//! Lexer edge cases and error tests.

use envfile_rs::{LexErrorKind, Quote, TokenKind, tokenize};

#[test]
fn assignment_token_pair() {
    let tokens = tokenize("HOST=localhost\n").expect("should tokenize");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[1].kind, TokenKind::Value { quote: Quote::None });
}

#[test]
fn underscore_and_digit_keys() {
    let tokens = tokenize("_PRIVATE=1\nKEY_2=two\n").expect("should tokenize");
    assert_eq!(tokens[0].text, "_PRIVATE");
    assert_eq!(tokens[2].text, "KEY_2");
}

#[test]
fn newline_tokens_only_for_blank_lines() {
    let tokens = tokenize("A=1\n\n# c\n\nB=2\n").expect("should tokenize");
    let newlines = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Newline)
        .count();
    assert_eq!(newlines, 2);
}

#[test]
fn escape_table_decodes_into_token_text() {
    let tokens = tokenize("K=\"\\b\\f\\r\\`\\'\"\n").expect("should tokenize");
    assert_eq!(tokens[1].text, "\u{0008}\u{000C}\r`'");
}

#[test]
fn supplementary_plane_escape() {
    let tokens = tokenize("K=\"\\U0001F4A9\"\n").expect("should tokenize");
    assert_eq!(tokens[1].text, "\u{1F4A9}");
}

#[test]
fn surrogate_escape_passes_through_literally() {
    // U+D800 is not a scalar value; the lenient policy keeps the text.
    let tokens = tokenize("K=\"\\uD800\"\n").expect("should tokenize");
    assert_eq!(tokens[1].text, "\\uD800");
}

#[test]
fn non_hex_unicode_escape_passes_through() {
    let tokens = tokenize("K=\"\\uZZZZ\"\n").expect("should tokenize");
    assert_eq!(tokens[1].text, "\\uZZZZ");
}

#[test]
fn backslash_at_end_of_quoted_body() {
    let tokens = tokenize("K=\"trailing\\\\\"\n").expect("should tokenize");
    assert_eq!(tokens[1].text, "trailing\\");
}

#[test]
fn single_quote_keeps_double_backslash() {
    let tokens = tokenize("A='C:\\\\Temp\\\\'\nB=ok\n").expect("should tokenize");
    assert_eq!(tokens[1].text, "C:\\\\Temp\\\\");
    assert_eq!(tokens[3].text, "ok");
}

#[test]
fn unquoted_value_with_inner_quote_chars() {
    let tokens = tokenize("K=it's fine\n").expect("should tokenize");
    assert_eq!(tokens[1].text, "it's fine");
    assert_eq!(tokens[1].kind, TokenKind::Value { quote: Quote::None });
}

#[test]
fn tab_separated_inline_comment() {
    let tokens = tokenize("K=v\t# note\n").expect("should tokenize");
    assert_eq!(tokens[1].text, "v");
    assert_eq!(tokens[2].text, "note");
}

#[test]
fn whitespace_only_line_is_blank() {
    let tokens = tokenize("A=1\n   \t\nB=2\n").expect("should tokenize");
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Newline));
}

#[test]
fn cr_only_terminator() {
    let tokens = tokenize("A=1\rB=2\r").expect("should tokenize");
    assert_eq!(tokens[0].text, "A");
    assert_eq!(tokens[2].text, "B");
    assert_eq!(tokens[2].start.line, 2);
}

#[test]
fn garbage_after_single_quote_rejected() {
    let err = tokenize("K='v'x\n").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacterAfterQuote('x'));
}

#[test]
fn second_value_after_quoted_value_rejected() {
    let err = tokenize("K=\"a\" \"b\"\n").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacterAfterQuote('"'));
}

#[test]
fn unterminated_backtick_rejected() {
    let err = tokenize("K=`open\n").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnterminatedQuote('`'));
}

#[test]
fn key_with_embedded_whitespace_rejected() {
    let err = tokenize("TWO WORDS=1\n").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::WhitespaceInKey);
}

#[test]
fn key_with_dash_rejected() {
    let err = tokenize("BAD-KEY=1\n").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('-'));
}

#[test]
fn line_starting_with_equals_rejected() {
    let err = tokenize("=nokey\n").expect_err("should fail");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('='));
}

#[test]
fn error_span_points_at_offending_line() {
    let err = tokenize("GOOD=1\nBAD KEY=2\n").expect_err("should fail");
    assert_eq!(err.span.line, 2);
}

#[test]
fn empty_input_yields_no_tokens() {
    let tokens = tokenize("").expect("should tokenize");
    assert!(tokens.is_empty());
}
