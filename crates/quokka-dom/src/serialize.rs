//! Serialization of a subtree back to markup or plain text.
//!
//! Output is compact: no indentation is added, text is written exactly as it
//! was parsed, and attributes come out sorted by name.

use crate::tags::is_standalone;
use crate::{AttrValue, DeclarationKind, DomTree, NodeId, NodeType};

impl DomTree {
    /// Markup for `id` including its own tag.
    ///
    /// The `:root` element has no markup of its own and serializes as its
    /// children.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Markup for the children of `id`.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Text content of the subtree, one text node per line.
    ///
    /// Comments and declarations contribute nothing.
    #[must_use]
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut pieces = Vec::new();
        self.collect_text(id, &mut pieces);
        pieces.join("\n")
    }

    fn collect_text<'a>(&'a self, id: NodeId, pieces: &mut Vec<&'a str>) {
        match self.get(id).map(|n| n.node_type()) {
            Some(NodeType::Text(text)) => pieces.push(text),
            Some(NodeType::Element(_)) => {
                for &child in self.children(id) {
                    self.collect_text(child, pieces);
                }
            }
            Some(NodeType::Declaration(_)) | None => {}
        }
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match node.node_type() {
            NodeType::Element(_) if id == NodeId::ROOT => {
                out.push_str(&self.inner_html(id));
            }
            NodeType::Element(data) => {
                out.push('<');
                out.push_str(&data.tag_name);
                for (name, value) in data.attributes() {
                    out.push(' ');
                    out.push_str(name);
                    if let AttrValue::Text(value) = value {
                        out.push('=');
                        push_quoted(value, out);
                    }
                }
                out.push('>');
                if is_standalone(&data.tag_name) && node.children().is_empty() {
                    return;
                }
                for &child in node.children() {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&data.tag_name);
                out.push('>');
            }
            NodeType::Text(text) => out.push_str(text),
            NodeType::Declaration(decl) => match decl.kind {
                DeclarationKind::Comment => {
                    out.push_str("<!--");
                    out.push_str(&decl.content);
                    out.push_str("-->");
                }
                DeclarationKind::Declaration => {
                    out.push_str("<!");
                    out.push_str(&decl.content);
                    out.push('>');
                }
            },
        }
    }
}

/// Double quotes unless the value itself contains one, then single quotes.
/// A value holding both kinds gets `&quot;` for its double quotes.
fn push_quoted(value: &str, out: &mut String) {
    if !value.contains('"') {
        out.push('"');
        out.push_str(value);
        out.push('"');
    } else if !value.contains('\'') {
        out.push('\'');
        out.push_str(value);
        out.push('\'');
    } else {
        out.push('"');
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
}
