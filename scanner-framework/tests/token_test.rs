//! Token primitives and the diagnostics they raise.

use scanner_framework::{Cursor, ErrorKind, RegexPattern, ScanError};

fn message(err: ScanError) -> String {
    err.to_string()
}

#[test]
fn test_expect_literal() {
    let mut cursor = Cursor::new("some text");
    assert_eq!(cursor.expect("some", None).unwrap(), "some");
    assert!(cursor.is_match(" ").unwrap());

    let mut cursor = Cursor::new("some text");
    let err = cursor.expect("text", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(
        message(err),
        "SyntaxError at line 1, column 0\n\n> 1 |some text\n\n Message: expected: text"
    );
    assert!(cursor.is_match("some").unwrap());

    let err = cursor.expect("text", Some("custom error message")).unwrap_err();
    assert!(message(err).ends_with("\n Message: custom error message"));
}

#[test]
fn test_expect_regex() {
    let some = RegexPattern::new("some").unwrap();
    let text = RegexPattern::new("text").unwrap();

    let mut cursor = Cursor::new("some text");
    assert_eq!(cursor.expect(&some, None).unwrap(), "some");
    assert!(cursor.is_match(" ").unwrap());

    let mut cursor = Cursor::new("some text");
    let err = cursor.expect(&text, None).unwrap_err();
    assert_eq!(
        err.diagnostic().map(|d| d.message().to_string()),
        Some("expected: /text/".to_string())
    );
    assert_eq!(cursor.offset(), 0);

    let err = cursor.expect(&text, Some("custom error text")).unwrap_err();
    assert_eq!(err.diagnostic().unwrap().message(), "custom error text");
}

#[test]
fn test_expect_word() {
    let mut cursor = Cursor::new("  Expected!");
    assert_eq!(cursor.expect_word(Some("expected")).unwrap(), "expected");
    assert!(cursor.is_match("!").unwrap());

    let mut cursor = Cursor::new("  Expected!");
    assert_eq!(cursor.expect_word(Some("EXPECTED")).unwrap(), "expected");

    let mut cursor = Cursor::new("wrong");
    let err = cursor.expect_word(Some("some")).unwrap_err();
    assert_eq!(
        message(err),
        "SyntaxError at line 1, column 0\n\n> 1 |wrong\n\n Message: expected word: some"
    );
    assert!(cursor.is_match("wrong").unwrap());
}

#[test]
fn test_expect_any_word() {
    let mut cursor = Cursor::new("  WORD!");
    assert_eq!(cursor.expect_word(None).unwrap(), "word");
    assert!(cursor.is_match("!").unwrap());

    let mut cursor = Cursor::new("  ***");
    let err = cursor.expect_word(None).unwrap_err();
    assert_eq!(err.diagnostic().unwrap().message(), "expected any word");
    // restored to before the skipped space
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn test_word_cache_matches_cold_scan() {
    let source = "  Alpha_1  beta";

    let mut cold = Cursor::new(source);
    let cold_word = cold.read_word();

    let mut warm = Cursor::new(source);
    assert!(warm.is_word(Some("alpha_1")));
    let warm_word = warm.read_word();

    assert_eq!(cold_word, warm_word);
    assert_eq!(cold.offset(), warm.offset());
    assert_eq!(warm.offset(), 11);
}

#[test]
fn test_word_cache_after_rollback() {
    let mut cursor = Cursor::new("first second");
    cursor.checkpoint();
    assert_eq!(cursor.read_word(), "first");
    cursor.rollback().unwrap();
    assert_eq!(cursor.read_word(), "first");
    assert_eq!(cursor.read_word(), "second");
    assert!(cursor.is_end());
}

#[test]
fn test_parse_unicode() {
    let cursor = Cursor::new("");
    assert_eq!(cursor.parse_unicode("67").unwrap(), 'g');

    let err = cursor.parse_unicode("***").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(
        message(err),
        "SyntaxError at line 1, column 0\n\n> 1 |\n\n Message: invalid unicode sequence: ***"
    );
}

#[test]
fn test_parse_unicode_is_not_evaluated() {
    let cursor = Cursor::new("");
    let err = cursor.parse_unicode("41}'+alert(1)+'").unwrap_err();
    assert!(err
        .to_string()
        .contains("invalid unicode sequence: 41}'+alert(1)+'"));
}
