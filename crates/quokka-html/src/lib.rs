//! HTML tree builder for the Quokka query engine.
//!
//! # Scope
//!
//! This crate turns HTML text into a [`quokka_dom::DomTree`]:
//! - **Tree Builder** - recursive, depth-counted element matching with
//!   raw-text (`script`, `style`) and standalone (`br`, `input`, ...) tags
//! - **Attribute Parser** - quote-aware `name=value` / bare-flag parsing
//! - **Loading** - [`parse_file`] with a typed not-found error
//!
//! # Leniency
//!
//! Building never fails. Unterminated elements become empty elements, stray
//! closing tags are dropped, and each recovery is reported as a
//! [`ParseIssue`] instead of an error.
//!
//! # Not Implemented
//!
//! - Implicit tag closing (`<p>one<p>two`)
//! - Character reference decoding
//! - Encoding detection

/// Attribute parsing for opening-tag spans.
pub mod attributes;
/// Recursive tree construction.
pub mod builder;
/// Parser configuration.
pub mod config;
/// Reading documents from disk.
pub mod load;

pub use attributes::parse_attributes;
pub use builder::{HtmlParser, ParseIssue, ParseIssueKind, parse_document, parse_fragment_into};
pub use config::ParserConfig;
pub use load::{LoadError, parse_file, read_html};
