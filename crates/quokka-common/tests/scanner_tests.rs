//! Tests for the quote-aware scanner.

use quokka_common::Scanner;
use quokka_common::scanner::WHITESPACE;

#[test]
fn test_read_char_until_end() {
    let mut scanner = Scanner::new("ab");
    assert_eq!(scanner.read_char(), Some('a'));
    assert_eq!(scanner.read_char(), Some('b'));
    assert_eq!(scanner.read_char(), None);
    assert_eq!(scanner.read_char(), None);
    assert!(scanner.is_eof());
}

#[test]
fn test_read_char_multibyte() {
    let mut scanner = Scanner::new("é<");
    assert_eq!(scanner.read_char(), Some('é'));
    assert_eq!(scanner.position(), 2);
    assert!(scanner.peek_matches("<"));
}

#[test]
fn test_peek_matches_does_not_consume() {
    let scanner = Scanner::new("<!-- x -->");
    assert!(scanner.peek_matches("<!--"));
    assert!(!scanner.peek_matches("<!DOCTYPE"));
    assert_eq!(scanner.position(), 0);
}

#[test]
fn test_seek_clamps_and_respects_char_boundaries() {
    let mut scanner = Scanner::new("aé");
    scanner.seek(2);
    assert_eq!(scanner.position(), 3);
    scanner.seek(100);
    assert!(scanner.is_eof());
    scanner.seek(0);
    assert_eq!(scanner.peek(), Some('a'));
}

#[test]
fn test_read_until_exclusive_and_inclusive() {
    let mut scanner = Scanner::new("hello<b>");
    assert_eq!(scanner.read_until("<", false), "hello");
    assert_eq!(scanner.read_until(">", true), "<b>");
    assert!(scanner.is_eof());
}

#[test]
fn test_read_until_skips_quoted_terminators() {
    let mut scanner = Scanner::new(r#"<a title="x > y" alt='>'>rest"#);
    assert_eq!(scanner.read_until(">", true), r#"<a title="x > y" alt='>'>"#);
    assert_eq!(scanner.rest(), "rest");
}

#[test]
fn test_read_until_inner_quotes_are_literal() {
    // The apostrophe inside the double-quoted run must not open a new run.
    let mut scanner = Scanner::new(r#"<p title="it's">x"#);
    assert_eq!(scanner.read_until(">", true), r#"<p title="it's">"#);
}

#[test]
fn test_read_until_missing_literal_consumes_everything() {
    let mut scanner = Scanner::new("no terminator");
    assert_eq!(scanner.read_until(">", true), "no terminator");
    assert!(scanner.is_eof());
}

#[test]
fn test_read_until_literal_ignores_quotes() {
    let mut scanner = Scanner::new("it's a comment -->after");
    assert_eq!(scanner.read_until_literal("-->", true), "it's a comment -->");
    assert_eq!(scanner.rest(), "after");
}

#[test]
fn test_read_until_any_of_leaves_cursor_on_delimiter() {
    let mut scanner = Scanner::new("div.item#main");
    assert_eq!(scanner.read_until_any_of(&['.', '#']), "div");
    assert_eq!(scanner.read_char(), Some('.'));
    assert_eq!(scanner.read_until_any_of(&['.', '#']), "item");
    assert_eq!(scanner.peek(), Some('#'));
}

#[test]
fn test_read_until_any_of_at_end() {
    let mut scanner = Scanner::new("plain");
    assert_eq!(scanner.read_until_any_of(&['.']), "plain");
    assert!(scanner.is_eof());
}

#[test]
fn test_skip_while() {
    let mut scanner = Scanner::new(" \t\n > li");
    scanner.skip_while(WHITESPACE);
    assert_eq!(scanner.read_char(), Some('>'));
    scanner.skip_while(WHITESPACE);
    assert_eq!(scanner.rest(), "li");
}

#[test]
fn test_read_balanced_node_nested_same_name() {
    let mut scanner = Scanner::new("<a><b><a></a></b></a>tail");
    assert_eq!(scanner.read_until(">", true), "<a>");
    assert_eq!(scanner.read_balanced_node("a"), "<b><a></a></b>");
    assert_eq!(scanner.rest(), "tail");
}

#[test]
fn test_read_balanced_node_respects_name_boundary() {
    let mut scanner = Scanner::new("<abbr>x</abbr></a>");
    assert_eq!(scanner.read_balanced_node("a"), "<abbr>x</abbr>");
    assert!(scanner.is_eof());
}

#[test]
fn test_read_balanced_node_unterminated_restores_position() {
    let mut scanner = Scanner::new("<div>text without close");
    let _ = scanner.read_until(">", true);
    let before = scanner.position();
    assert_eq!(scanner.read_balanced_node("div"), "");
    assert_eq!(scanner.position(), before);
    assert_eq!(scanner.rest(), "text without close");
}

#[test]
fn test_read_balanced_node_closing_tag_with_whitespace() {
    let mut scanner = Scanner::new("inner</p >next");
    assert_eq!(scanner.read_balanced_node("p"), "inner");
    assert_eq!(scanner.rest(), "next");
}
