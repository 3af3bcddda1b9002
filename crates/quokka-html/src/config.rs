use quokka_dom::{RAW_TEXT_TAGS, STANDALONE_TAGS};

/// Default limit on element nesting handled recursively.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs for [`crate::HtmlParser`].
///
/// Tag-name lookups are ASCII case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Tags that never get a closing-tag search or children.
    pub standalone_tags: Vec<String>,
    /// Tags whose inner span is stored as one literal text child.
    pub raw_text_tags: Vec<String>,
    /// Elements nested deeper than this keep their inner HTML as text
    /// instead of being parsed, which bounds recursion.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            standalone_tags: STANDALONE_TAGS.iter().map(|t| (*t).to_string()).collect(),
            raw_text_tags: RAW_TEXT_TAGS.iter().map(|t| (*t).to_string()).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Treat `tag` as standalone as well.
    #[must_use]
    pub fn with_standalone_tag(mut self, tag: impl Into<String>) -> Self {
        self.standalone_tags.push(tag.into());
        self
    }

    /// Treat `tag` as raw text as well.
    #[must_use]
    pub fn with_raw_text_tag(mut self, tag: impl Into<String>) -> Self {
        self.raw_text_tags.push(tag.into());
        self
    }

    /// Change the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// True if `tag_name` is configured as standalone.
    #[must_use]
    pub fn is_standalone(&self, tag_name: &str) -> bool {
        self.standalone_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag_name))
    }

    /// True if `tag_name` is configured as raw text.
    #[must_use]
    pub fn is_raw_text(&self, tag_name: &str) -> bool {
        self.raw_text_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag_name))
    }
}
