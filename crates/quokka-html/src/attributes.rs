use quokka_common::Scanner;
use quokka_common::scanner::WHITESPACE;
use quokka_dom::{AttrValue, AttributesMap};

/// Parse the attributes of an opening-tag span such as
/// `<input type='text' required>`.
///
/// Whitespace runs outside quotes collapse to one space, the leading
/// `<name` and trailing `/>` or `>` are stripped, and the remainder is split
/// on spaces without breaking quoted values. `name=value` pairs lose one layer
/// of matching quotes around the value; bare names become
/// [`AttrValue::Flag`]. When a name repeats, the last occurrence wins.
#[must_use]
pub fn parse_attributes(tag_span: &str) -> AttributesMap {
    let normalized = collapse_whitespace(tag_span);
    let body = strip_tag_wrapper(&normalized);

    let mut attrs = AttributesMap::new();
    for token in join_spaced_equals(split_on_spaces(body)) {
        let (name, value) = match token.split_once('=') {
            Some((name, value)) => (name, AttrValue::Text(unquote(value).to_string())),
            None => (token.as_str(), AttrValue::Flag),
        };
        if name.is_empty() {
            continue;
        }
        let _ = attrs.insert(name.to_string(), value);
    }
    attrs
}

/// Collapse every whitespace run that is not inside quotes into one space.
fn collapse_whitespace(span: &str) -> String {
    let mut out = String::with_capacity(span.len());
    let mut quote: Option<char> = None;
    let mut in_space = false;

    for c in span.chars() {
        match quote {
            Some(q) => {
                out.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if WHITESPACE.contains(&c) => {
                if !in_space {
                    out.push(' ');
                }
                in_space = true;
                continue;
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
        in_space = false;
    }
    out
}

/// `<a href="x">` -> ` href="x"`
fn strip_tag_wrapper(span: &str) -> &str {
    let body = span.strip_prefix('<').unwrap_or(span);
    let name_end = body.find([' ', '>', '/']).unwrap_or(body.len());
    let body = &body[name_end..];
    body.strip_suffix("/>")
        .or_else(|| body.strip_suffix('>'))
        .unwrap_or(body)
}

fn split_on_spaces(body: &str) -> Vec<&str> {
    let mut scanner = Scanner::new(body);
    let mut tokens = Vec::new();
    while !scanner.is_eof() {
        let token = scanner.read_until(" ", false).trim();
        let _ = scanner.read_char();
        if !token.is_empty() {
            tokens.push(token);
        }
    }
    tokens
}

/// Re-join `name = value` written with spaces around the `=`.
fn join_spaced_equals(tokens: Vec<&str>) -> Vec<String> {
    let mut joined: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(last) = joined.last_mut() {
            if last.ends_with('=') || token.starts_with('=') {
                last.push_str(token);
                continue;
            }
        }
        joined.push(token.to_string());
    }
    joined
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
