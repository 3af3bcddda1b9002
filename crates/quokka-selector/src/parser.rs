//! Selector text to selector chains.
//!
//! A selector list such as `nav > a.active, footer a` is split on top-level
//! commas into one [`SelectorChain`] per alternative. Each chain is a singly
//! linked list of compound selectors built left to right, where every link
//! owns its predecessor:
//!
//! ```text
//! "section > ul li"
//!
//!   head: li  --(Descendant)-->  ul  --(Child)-->  section
//! ```
//!
//! The head is the **rightmost** compound. Matching starts there, on the
//! candidate node, and walks toward the document root or earlier siblings.
//! A link's [`Combinator`] describes how it relates to its predecessor, so
//! the `>` between `section` and `ul` is stored on `ul`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use quokka_common::Scanner;
use quokka_common::scanner::WHITESPACE;
use strum_macros::Display;
use thiserror::Error;

use crate::compiler::{Checker, compile};

/// Errors produced while parsing selector text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The text contains no compound selector at all.
    #[error("empty selector")]
    Empty,
    /// A bracket, parenthesis or brace closes without opening, or never
    /// closes.
    #[error("unbalanced `{delimiter}` at offset {offset} in selector")]
    Unbalanced {
        /// The offending delimiter.
        delimiter: char,
        /// Byte offset of the delimiter in the selector text.
        offset: usize,
    },
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// How a chain link relates to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Combinator {
    /// `A B`: the predecessor matches some ancestor.
    #[default]
    #[strum(to_string = " ")]
    Descendant,
    /// `A > B`: the predecessor matches the parent.
    #[strum(to_string = " > ")]
    Child,
    /// `A + B`: the predecessor matches the immediately preceding element
    /// sibling.
    #[strum(to_string = " + ")]
    NextSibling,
    /// `A ~ B`: the predecessor matches any preceding element sibling.
    #[strum(to_string = " ~ ")]
    SubsequentSibling,
}

impl Combinator {
    const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Child),
            '+' => Some(Self::NextSibling),
            '~' => Some(Self::SubsequentSibling),
            _ => None,
        }
    }
}

/// One compound selector and the links to its left.
///
/// See the [module documentation](self) for the link direction.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    compound: String,
    combinator: Combinator,
    parent: Option<Box<SelectorChain>>,
    checkers: OnceLock<Vec<Checker>>,
}

impl SelectorChain {
    fn new(compound: &str, combinator: Combinator, parent: Option<Self>) -> Self {
        Self {
            compound: compound.to_string(),
            combinator,
            parent: parent.map(Box::new),
            checkers: OnceLock::new(),
        }
    }

    /// Source text of this link's compound selector.
    #[must_use]
    pub fn compound(&self) -> &str {
        &self.compound
    }

    /// Relation of this link to its predecessor. The leftmost link reports
    /// [`Combinator::Descendant`].
    #[must_use]
    pub const fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// The compound to the left of this one, if any.
    #[must_use]
    pub fn predecessor(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Compiled checkers for this compound, compiled on first use.
    #[must_use]
    pub fn checkers(&self) -> &[Checker] {
        self.checkers.get_or_init(|| compile(&self.compound))
    }

    /// Links from the head back to the leftmost compound.
    #[must_use]
    pub fn links(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |link| link.predecessor())
    }
}

impl fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut links: Vec<&Self> = self.links().collect();
        links.reverse();
        for (i, link) in links.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", link.combinator)?;
            }
            f.write_str(&link.compound)?;
        }
        Ok(())
    }
}

/// A parsed, comma-separated selector list.
///
/// An element matches the list if it matches any of its chains. Checkers
/// are compiled once per link and reused, so a list can be parsed once and
/// matched against many nodes or trees, including from several threads.
///
/// ```
/// use quokka_selector::SelectorList;
///
/// let list = SelectorList::parse("nav > a.active, footer a").unwrap();
/// assert_eq!(list.chains().len(), 2);
/// assert_eq!(list.to_string(), "nav > a.active, footer a");
/// ```
#[derive(Debug, Clone)]
pub struct SelectorList(Vec<SelectorChain>);

impl SelectorList {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Unbalanced`] for mismatched `(`, `[` or `{`, and
    /// [`SelectorError::Empty`] when no alternative has a compound selector.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        check_balance(text)?;
        let chains: Vec<SelectorChain> = split_top_level(text)
            .into_iter()
            .filter_map(parse_chain)
            .collect();
        if chains.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self(chains))
    }

    /// The alternatives, in source order.
    #[must_use]
    pub fn chains(&self) -> &[SelectorChain] {
        &self.0
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{chain}")?;
        }
        Ok(())
    }
}

/// Consume a quoted run whose opening quote was just read.
fn skip_quoted(scanner: &mut Scanner<'_>, quote: char) {
    let mut buf = [0u8; 4];
    let _ = scanner.read_until_literal(quote.encode_utf8(&mut buf), true);
}

fn check_balance(text: &str) -> Result<(), SelectorError> {
    let mut scanner = Scanner::new(text);
    let mut open: Vec<(char, usize)> = Vec::new();

    loop {
        let offset = scanner.position();
        let Some(c) = scanner.read_char() else {
            break;
        };
        let expected = match c {
            '"' | '\'' => {
                skip_quoted(&mut scanner, c);
                continue;
            }
            '(' | '[' | '{' => {
                open.push((c, offset));
                continue;
            }
            ')' => '(',
            ']' => '[',
            '}' => '{',
            _ => continue,
        };
        match open.pop() {
            Some((opener, _)) if opener == expected => {}
            _ => return Err(SelectorError::Unbalanced { delimiter: c, offset }),
        }
    }

    match open.pop() {
        Some((delimiter, offset)) => Err(SelectorError::Unbalanced { delimiter, offset }),
        None => Ok(()),
    }
}

/// Split on commas outside brackets and quotes.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut scanner = Scanner::new(text);
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;

    loop {
        let offset = scanner.position();
        let Some(c) = scanner.read_char() else {
            break;
        };
        match c {
            '"' | '\'' => skip_quoted(&mut scanner, c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&text[start..offset]);
                start = scanner.position();
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Build the chain for one alternative, or `None` if it has no compound.
fn parse_chain(piece: &str) -> Option<SelectorChain> {
    let mut scanner = Scanner::new(piece);
    let mut segments: Vec<(Combinator, &str)> = Vec::new();
    let mut pending = Combinator::Descendant;
    let mut start: Option<usize> = None;
    let mut depth = 0usize;

    loop {
        let offset = scanner.position();
        let Some(c) = scanner.read_char() else {
            break;
        };

        if depth == 0 && (WHITESPACE.contains(&c) || Combinator::from_symbol(c).is_some()) {
            if let Some(s) = start.take() {
                segments.push((pending, &piece[s..offset]));
                pending = Combinator::Descendant;
            }
            if let Some(combinator) = Combinator::from_symbol(c) {
                pending = combinator;
            }
            continue;
        }

        if start.is_none() {
            start = Some(offset);
        }
        match c {
            '"' | '\'' => skip_quoted(&mut scanner, c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    if let Some(s) = start {
        segments.push((pending, &piece[s..]));
    }

    segments
        .into_iter()
        .fold(None, |parent, (combinator, compound)| {
            let combinator = if parent.is_some() {
                combinator
            } else {
                Combinator::Descendant
            };
            Some(SelectorChain::new(compound, combinator, parent))
        })
}
