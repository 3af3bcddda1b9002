//! Compound selector text to node predicates.
//!
//! A compound such as `input.field#email[type=text]` compiles to a list of
//! [`Checker`]s that must all pass on the same element.

use std::borrow::Cow;

use quokka_common::Scanner;
use quokka_common::scanner::WHITESPACE;
use quokka_common::warning::warn_once;
use quokka_dom::ElementData;
use strum_macros::Display;

/// Characters that start a new simple selector inside a compound.
const SIMPLE_START: &[char] = &['.', '#', '[', ':'];

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checker {
    /// `*`
    Universal,
    /// `div`. Compared ASCII case-insensitively.
    Tag(String),
    /// `.name`: the class list contains `name`.
    Class(String),
    /// `#name`: the id equals `name`.
    Id(String),
    /// `[name]`, `[name=value]`, `[name^=value i]`, ...
    Attribute(AttributeChecker),
}

impl Checker {
    /// True if `element` satisfies this condition.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Class(name) => element.has_class(name),
            Self::Id(name) => element.id() == Some(name.as_str()),
            Self::Attribute(attr) => attr.matches(element),
        }
    }
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AttributeOperator {
    /// `[attr]`
    #[strum(to_string = "")]
    Exists,
    /// `[attr=v]`: exactly `v`.
    #[strum(to_string = "=")]
    Equals,
    /// `[attr~=v]`: one of the whitespace-separated words is `v`.
    #[strum(to_string = "~=")]
    Includes,
    /// `[attr|=v]`: exactly `v`, or `v` followed by `-`.
    #[strum(to_string = "|=")]
    DashMatch,
    /// `[attr^=v]`: starts with `v`.
    #[strum(to_string = "^=")]
    Prefix,
    /// `[attr$=v]`: ends with `v`.
    #[strum(to_string = "$=")]
    Suffix,
    /// `[attr*=v]`: contains `v`.
    #[strum(to_string = "*=")]
    Substring,
}

/// A compiled attribute selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChecker {
    /// Attribute name, compared exactly.
    pub name: String,
    /// Comparison to apply.
    pub operator: AttributeOperator,
    /// Unquoted comparison value. Already lowercased when
    /// `case_insensitive` is set.
    pub value: String,
    /// Set by a trailing `i` flag.
    pub case_insensitive: bool,
}

impl AttributeChecker {
    /// True if `element` carries the attribute and its value satisfies the
    /// operator. A bare flag attribute compares as the empty string.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        let Some(actual) = element.get_attribute(&self.name) else {
            return false;
        };
        let actual = if self.case_insensitive {
            Cow::Owned(actual.as_str().to_lowercase())
        } else {
            Cow::Borrowed(actual.as_str())
        };
        let expected = self.value.as_str();

        match self.operator {
            AttributeOperator::Exists => true,
            AttributeOperator::Equals => actual == expected,
            AttributeOperator::Includes => actual
                .split(WHITESPACE)
                .any(|word| !word.is_empty() && word == expected),
            AttributeOperator::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            AttributeOperator::Prefix => actual.starts_with(expected),
            AttributeOperator::Suffix => actual.ends_with(expected),
            AttributeOperator::Substring => actual.contains(expected),
        }
    }
}

/// Compile one compound selector.
///
/// A leading bare token is a tag name (`*` for any element); `.x`, `#x` and
/// `[...]` add class, id and attribute conditions. Pseudo-classes and
/// pseudo-elements are not supported: they produce a warning and no
/// condition, so `a:hover` behaves like `a`.
#[must_use]
pub fn compile(compound: &str) -> Vec<Checker> {
    let mut scanner = Scanner::new(compound);
    let mut checkers = Vec::new();

    match scanner.read_until_any_of(SIMPLE_START) {
        "" => {}
        "*" => checkers.push(Checker::Universal),
        tag => checkers.push(Checker::Tag(tag.to_string())),
    }

    while let Some(c) = scanner.read_char() {
        match c {
            '.' => {
                let name = scanner.read_until_any_of(SIMPLE_START);
                if !name.is_empty() {
                    checkers.push(Checker::Class(name.to_string()));
                }
            }
            '#' => {
                let name = scanner.read_until_any_of(SIMPLE_START);
                if !name.is_empty() {
                    checkers.push(Checker::Id(name.to_string()));
                }
            }
            '[' => {
                let expr = scanner.read_until("]", false);
                let _ = scanner.read_char();
                match attribute_checker(expr) {
                    Some(attr) => checkers.push(Checker::Attribute(attr)),
                    None => warn_once(
                        "Selector",
                        &format!("ignoring malformed attribute selector `[{expr}]`"),
                    ),
                }
            }
            ':' => {
                let pseudo = read_pseudo(&mut scanner, compound);
                warn_once(
                    "Selector",
                    &format!("pseudo-class `:{pseudo}` is not supported and matches everything"),
                );
            }
            _ => {
                let stray = scanner.read_until_any_of(SIMPLE_START);
                warn_once(
                    "Selector",
                    &format!("ignoring `{c}{stray}` in compound `{compound}`"),
                );
            }
        }
    }
    checkers
}

/// Read a pseudo-class after its `:`, including a second `:` and a
/// parenthesized argument.
fn read_pseudo<'a>(scanner: &mut Scanner<'a>, compound: &'a str) -> &'a str {
    let start = scanner.position();
    if scanner.peek() == Some(':') {
        let _ = scanner.read_char();
    }
    let _ = scanner.read_until_any_of(&['.', '#', '[', ':', '(']);

    if scanner.peek() == Some('(') {
        let mut depth = 0usize;
        while let Some(c) = scanner.read_char() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                '"' | '\'' => {
                    let mut buf = [0u8; 4];
                    let _ = scanner.read_until_literal(c.encode_utf8(&mut buf), true);
                }
                _ => {}
            }
        }
    }
    &compound[start..scanner.position()]
}

/// Compile the text between `[` and `]`.
fn attribute_checker(expr: &str) -> Option<AttributeChecker> {
    let expr = expr.trim_matches(WHITESPACE);

    let Some(eq) = expr.find('=') else {
        return (!expr.is_empty()).then(|| AttributeChecker {
            name: expr.to_string(),
            operator: AttributeOperator::Exists,
            value: String::new(),
            case_insensitive: false,
        });
    };

    let (operator, name_end) = match expr[..eq].chars().next_back() {
        Some('~') => (AttributeOperator::Includes, eq - 1),
        Some('|') => (AttributeOperator::DashMatch, eq - 1),
        Some('^') => (AttributeOperator::Prefix, eq - 1),
        Some('$') => (AttributeOperator::Suffix, eq - 1),
        Some('*') => (AttributeOperator::Substring, eq - 1),
        _ => (AttributeOperator::Equals, eq),
    };
    let name = expr[..name_end].trim_matches(WHITESPACE);
    if name.is_empty() {
        return None;
    }

    let (raw, case_insensitive) = split_flag(expr[eq + 1..].trim_matches(WHITESPACE));
    let value = unquote(raw);
    Some(AttributeChecker {
        name: name.to_string(),
        operator,
        value: if case_insensitive {
            value.to_lowercase()
        } else {
            value.to_string()
        },
        case_insensitive,
    })
}

/// Split a trailing ` i` / ` s` flag off an attribute value.
///
/// The flag must follow whitespace or a closing quote, so `[lang=hi]` keeps
/// its value.
fn split_flag(raw: &str) -> (&str, bool) {
    let Some(flag) = raw.chars().next_back() else {
        return (raw, false);
    };
    let rest = &raw[..raw.len() - flag.len_utf8()];
    let separated = rest.ends_with(WHITESPACE) || rest.ends_with(['"', '\'']);
    match flag {
        'i' | 'I' if separated => (rest.trim_end_matches(WHITESPACE), true),
        's' | 'S' if separated => (rest.trim_end_matches(WHITESPACE), false),
        _ => (raw, false),
    }
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
