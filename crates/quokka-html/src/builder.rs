use quokka_common::Scanner;
use quokka_common::scanner::WHITESPACE;
use quokka_common::warning::warn_once;
use quokka_dom::{DeclarationData, DeclarationKind, DomTree, ElementData, NodeId, NodeType};
use strum_macros::Display;

use crate::attributes::parse_attributes;
use crate::config::ParserConfig;

/// What kind of malformed markup was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParseIssueKind {
    /// A closing tag with no open element of that name; it was dropped.
    #[strum(to_string = "stray end tag")]
    StrayEndTag,
    /// An opening tag whose closing tag never appears; it became an empty
    /// element and scanning resumed right after the opening tag.
    #[strum(to_string = "unterminated element")]
    UnterminatedElement,
    /// A comment without `-->`; it runs to the end of its container.
    #[strum(to_string = "unterminated comment")]
    UnterminatedComment,
    /// A `<` not followed by a tag name; the span was dropped.
    #[strum(to_string = "empty tag name")]
    EmptyTagName,
    /// Nesting exceeded [`ParserConfig::max_depth`]; the inner HTML was kept
    /// as text.
    #[strum(to_string = "nesting too deep")]
    DepthLimit,
}

/// A recovered problem in the input markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Category of the problem.
    pub kind: ParseIssueKind,
    /// Human-readable description, usually quoting the offending markup.
    pub message: String,
    /// Byte offset into the parsed input where the offending markup starts.
    pub offset: usize,
}

/// Builds a [`DomTree`] from HTML text.
///
/// ```
/// use quokka_html::HtmlParser;
///
/// let tree = HtmlParser::new("<p class=intro>Hello</p>").run();
/// let p = tree.children(tree.root())[0];
/// assert_eq!(tree.node_name(p), Some("p"));
/// ```
#[derive(Debug)]
pub struct HtmlParser<'a> {
    input: &'a str,
    config: ParserConfig,
}

impl<'a> HtmlParser<'a> {
    /// Create a parser with the default configuration.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            config: ParserConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the parser and return the tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the parser and return both the tree and any recovered problems.
    #[must_use]
    pub fn run_with_issues(self) -> (DomTree, Vec<ParseIssue>) {
        let mut tree = DomTree::new();
        let issues = parse_fragment_into(&mut tree, NodeId::ROOT, self.input, &self.config);
        (tree, issues)
    }
}

/// Parse `html` with the default configuration.
#[must_use]
pub fn parse_document(html: &str) -> DomTree {
    HtmlParser::new(html).run()
}

/// Parse `html` and append the resulting nodes as children of `parent`.
///
/// `parent` must be an element of `tree`; otherwise nothing is appended.
/// Returns the problems recovered from while parsing.
pub fn parse_fragment_into(
    tree: &mut DomTree,
    parent: NodeId,
    html: &str,
    config: &ParserConfig,
) -> Vec<ParseIssue> {
    let mut builder = TreeBuilder {
        tree,
        config,
        issues: Vec::new(),
    };
    builder.build(parent, html, 0, 0);
    builder.issues
}

struct TreeBuilder<'t, 'c> {
    tree: &'t mut DomTree,
    config: &'c ParserConfig,
    issues: Vec<ParseIssue>,
}

impl TreeBuilder<'_, '_> {
    /// Append every node found in `html` to `parent`.
    ///
    /// `base` is the offset of `html` within the whole input and `depth` the
    /// nesting level of `parent`'s children.
    fn build(&mut self, parent: NodeId, html: &str, base: usize, depth: usize) {
        let mut scanner = Scanner::new(html);

        while !scanner.is_eof() {
            let text = scanner.read_until_literal("<", false);
            if !text.trim_matches(WHITESPACE).is_empty() {
                let _ = self.attach(parent, NodeType::Text(text.to_string()));
            }
            if scanner.is_eof() {
                break;
            }

            let offset = base + scanner.position();

            // Comments end at the first `-->` regardless of quotes, so an
            // apostrophe in `<!-- it's -->` cannot swallow the markup after it.
            if scanner.peek_matches("<!--") {
                let _ = scanner.read_until_literal("<!--", true);
                let content = scanner.read_until_literal("-->", false);
                if scanner.peek_matches("-->") {
                    let _ = scanner.read_until_literal("-->", true);
                } else {
                    self.issue(ParseIssueKind::UnterminatedComment, "<!--", offset);
                }
                let _ = self.attach(
                    parent,
                    declaration(content, DeclarationKind::Comment),
                );
                continue;
            }

            let span = scanner.read_until(">", true);

            if span.starts_with("</") {
                self.issue(ParseIssueKind::StrayEndTag, span, offset);
                continue;
            }

            if let Some(inner) = span.strip_prefix("<!") {
                let content = inner.strip_suffix('>').unwrap_or(inner);
                let _ = self.attach(
                    parent,
                    declaration(content, DeclarationKind::Declaration),
                );
                continue;
            }

            let tag_name = extract_tag_name(span);
            if tag_name.is_empty() {
                self.issue(ParseIssueKind::EmptyTagName, span, offset);
                continue;
            }

            let element = ElementData::with_attributes(tag_name, parse_attributes(span));
            let Some(node) = self.attach(parent, NodeType::Element(element)) else {
                continue;
            };

            if self.config.is_standalone(tag_name) || span.ends_with("/>") {
                continue;
            }

            let inner_start = scanner.position();
            let inner = scanner.read_balanced_node(tag_name);
            if scanner.position() == inner_start {
                self.issue(ParseIssueKind::UnterminatedElement, span, offset);
                continue;
            }

            if self.config.is_raw_text(tag_name) {
                if !inner.is_empty() {
                    let _ = self.attach(node, NodeType::Text(inner.to_string()));
                }
            } else if depth + 1 >= self.config.max_depth {
                self.issue(ParseIssueKind::DepthLimit, span, offset);
                if !inner.is_empty() {
                    let _ = self.attach(node, NodeType::Text(inner.to_string()));
                }
            } else {
                self.build(node, inner, base + inner_start, depth + 1);
            }
        }
    }

    /// Allocate a node and append it to `parent`.
    ///
    /// Parents handed to the builder are always elements and fresh nodes are
    /// always detached, so this only fails for a non-element `parent` passed
    /// to [`parse_fragment_into`].
    fn attach(&mut self, parent: NodeId, node_type: NodeType) -> Option<NodeId> {
        let id = self.tree.alloc(node_type);
        self.tree.append_child(parent, id).ok().map(|()| id)
    }

    fn issue(&mut self, kind: ParseIssueKind, markup: &str, offset: usize) {
        let message = format!("{kind} `{}`", abbreviate(markup));
        warn_once("HTML", &message);
        self.issues.push(ParseIssue {
            kind,
            message,
            offset,
        });
    }
}

fn declaration(content: &str, kind: DeclarationKind) -> NodeType {
    NodeType::Declaration(DeclarationData {
        content: content.to_string(),
        kind,
    })
}

/// Characters after `<` up to the first whitespace, `>` or `/`.
fn extract_tag_name(span: &str) -> &str {
    let after = span.strip_prefix('<').unwrap_or(span);
    let end = after
        .find(|c: char| c == '>' || c == '/' || WHITESPACE.contains(&c))
        .unwrap_or(after.len());
    &after[..end]
}

/// First line of `markup`, cut to a readable length for diagnostics.
fn abbreviate(markup: &str) -> String {
    const LIMIT: usize = 40;
    let line = markup.lines().next().unwrap_or_default();
    if line.chars().count() > LIMIT {
        let cut: String = line.chars().take(LIMIT).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}
