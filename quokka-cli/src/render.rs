//! Colored, indented dump of a document tree.

use std::fmt::Write;

use owo_colors::OwoColorize;
use quokka_dom::{AttrValue, DeclarationKind, DomTree, NodeId, NodeType};

/// Render the subtree at `id`, one node per line, children indented by two
/// spaces. Whitespace in text nodes is made visible.
pub fn render_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);

    // Writing to a String cannot fail.
    let _ = match node.node_type() {
        NodeType::Element(data) => {
            let mut line = format!("<{}", data.tag_name.cyan());
            for (name, value) in data.attributes() {
                match value {
                    AttrValue::Text(text) => {
                        let _ = write!(line, " {}={}", name.yellow(), format!("\"{text}\"").green());
                    }
                    AttrValue::Flag => {
                        let _ = write!(line, " {}", name.yellow());
                    }
                }
            }
            writeln!(out, "{prefix}{line}>")
        }
        NodeType::Text(text) => {
            let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}{}", format!("\"{display}\"").dimmed())
        }
        NodeType::Declaration(decl) => match decl.kind {
            DeclarationKind::Comment => {
                writeln!(out, "{prefix}{}", format!("<!--{}-->", decl.content).bright_black())
            }
            DeclarationKind::Declaration => {
                writeln!(out, "{prefix}{}", format!("<!{}>", decl.content).magenta())
            }
        },
    };

    for &child in tree.children(id) {
        write_node(tree, child, indent + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quokka_html::parse_document;

    #[test]
    fn test_one_line_per_node() {
        let tree =
            parse_document("<!DOCTYPE html><ul class=list><li>one</li><li hidden>two</li></ul>");
        let rendered = render_tree(&tree, tree.root());
        let lines: Vec<&str> = rendered.lines().collect();

        // :root, doctype, ul, li, text, li, text
        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains(":root"));
        assert!(lines[1].contains("DOCTYPE html"));
        assert!(lines[2].starts_with("  <"));
        assert!(lines[2].contains("list"));
        assert!(lines[5].contains("hidden"));
        assert!(lines[6].starts_with("      "));
    }

    #[test]
    fn test_text_whitespace_is_visible() {
        let tree = parse_document("<p>a b\nc</p>");
        let rendered = render_tree(&tree, tree.root());
        assert!(rendered.contains("a\u{00B7}b\\nc"));
    }
}
