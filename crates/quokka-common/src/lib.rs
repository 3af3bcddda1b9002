//! Common utilities for the Quokka query engine.
//!
//! This crate provides shared infrastructure used by the HTML tree builder
//! and the selector engine:
//! - **Scanner** - quote-aware forward cursor over an input string
//! - **Warning System** - colored, deduplicated terminal diagnostics

pub mod scanner;
pub mod warning;

pub use scanner::Scanner;
