//! CSS selector engine for the Quokka query engine.
//!
//! # Scope
//!
//! - **Parser** - selector lists into right-anchored [`SelectorChain`]s
//! - **Compiler** - compound selectors into [`Checker`] predicates, cached
//!   per chain link
//! - **Matcher** - `matches`, `query_selector` and `query_selector_all` over
//!   a [`quokka_dom::DomTree`]
//!
//! Supported syntax: type and universal selectors, `.class`, `#id`,
//! `[attr]`, `[attr=v]`, `[attr~=v]`, `[attr|=v]`, `[attr^=v]`, `[attr$=v]`,
//! `[attr*=v]` with optional quotes and `i`/`s` flags, the four combinators
//! (` `, `>`, `+`, `~`) and `,` lists.
//!
//! # Not Implemented
//!
//! - Pseudo-classes and pseudo-elements: parsed, reported through
//!   `warn_once`, and otherwise ignored
//! - Namespaces and the column combinator
//! - Specificity

pub mod compiler;
pub mod matcher;
pub mod parser;

pub use compiler::{AttributeChecker, AttributeOperator, Checker, compile};
pub use matcher::{matches, query_selector, query_selector_all};
pub use parser::{Combinator, SelectorChain, SelectorError, SelectorList};
