//! Tag sets that decide how the tree builder treats an element.

/// Node name of the synthetic element at the top of every document.
pub const ROOT_NAME: &str = ":root";

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements."
///
/// Standalone tags never get a closing-tag search and never get children.
pub const STANDALONE_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose whole inner span is kept as a single literal text child.
pub const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// True if `tag_name` is one of the [`STANDALONE_TAGS`].
#[must_use]
pub fn is_standalone(tag_name: &str) -> bool {
    STANDALONE_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(tag_name))
}
