//! Document tree for the Quokka query engine.
//!
//! This crate provides an arena-based tree structure loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! A parent owns its children through its child list; each child stores its
//! parent's index, so the back-reference never keeps anything alive and no
//! cycle ever has to be broken by the caller.
//!
//! The root of every tree is a synthetic element named `:root`.

use std::collections::BTreeMap;

pub mod serialize;
pub mod tags;

pub use tags::{RAW_TEXT_TAGS, ROOT_NAME, STANDALONE_TAGS};

/// Value of a single attribute.
///
/// `<input disabled>` has a [`AttrValue::Flag`] named `disabled`;
/// `<input type="text">` has a [`AttrValue::Text`] named `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A `name=value` attribute.
    Text(String),
    /// A bare attribute name with no value.
    Flag,
}

impl AttrValue {
    /// The attribute value as a string. A flag reads as the empty string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Flag => "",
        }
    }

    /// True for a bare attribute.
    #[must_use]
    pub const fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Map of attribute names to values for an element.
pub type AttributesMap = BTreeMap<String, AttrValue>;

/// Errors from structural tree mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The id does not belong to this tree.
    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeId),
    /// Only elements can have children.
    #[error("node {0:?} is not an element and cannot have children")]
    NotAnElement(NodeId),
    /// The node already has a parent; nodes are never re-parented.
    #[error("node {0:?} already has a parent")]
    AlreadyAttached(NodeId),
    /// The document root cannot be appended anywhere.
    #[error("the document root cannot be appended to another node")]
    IsRoot,
    /// Appending would make a node its own ancestor.
    #[error("appending {child:?} to {parent:?} would create a cycle")]
    Cycle {
        /// The would-be parent.
        parent: NodeId,
        /// The node being appended.
        child: NodeId,
    },
}

/// A type-safe index into the document tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// Equality of two ids is node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic `:root` element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    node_type: NodeType,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// The node's kind and payload.
    #[must_use]
    pub const fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order. Always empty for text and declarations.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// `nodeName`: the tag name for elements, `#text` or `#declaration` for
    /// the other kinds.
    #[must_use]
    pub fn node_name(&self) -> &str {
        match &self.node_type {
            NodeType::Element(data) => &data.tag_name,
            NodeType::Text(_) => "#text",
            NodeType::Declaration(_) => "#declaration",
        }
    }
}

/// The three node kinds produced by the tree builder.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// A comment or a `<!...>` declaration such as a doctype.
    Declaration(DeclarationData),
}

/// Which markup construct produced a [`DeclarationData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `<!-- ... -->`
    Comment,
    /// `<! ... >`, e.g. `<!DOCTYPE html>`
    Declaration,
}

/// Payload of a declaration node. `content` excludes the markup wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationData {
    /// Raw text between the wrapper delimiters.
    pub content: String,
    /// Comment or declaration.
    pub kind: DeclarationKind,
}

/// Element-specific data.
///
/// The attribute map is private so that the cached `id` and class list can
/// never drift from it: every mutation goes through [`ElementData::set_attribute`]
/// or [`ElementData::remove_attribute`].
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    attrs: AttributesMap,
    id: Option<String>,
    class_list: Vec<String>,
}

impl ElementData {
    /// An element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self::with_attributes(tag_name, AttributesMap::new())
    }

    /// An element with the given attributes.
    #[must_use]
    pub fn with_attributes(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        let mut data = Self {
            tag_name: tag_name.into(),
            attrs,
            id: None,
            class_list: Vec::new(),
        };
        data.refresh_special_attributes();
        data
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Class names from the class attribute, in attribute order.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    #[must_use]
    pub fn class_list(&self) -> &[String] {
        &self.class_list
    }

    /// True if `name` is one of the element's classes.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.class_list.iter().any(|class| class == name)
    }

    /// All attributes.
    #[must_use]
    pub const fn attributes(&self) -> &AttributesMap {
        &self.attrs
    }

    /// Value of attribute `name`.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// True if attribute `name` is present, with or without a value.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Set or replace attribute `name`.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let _ = self.attrs.insert(name.into(), value.into());
        self.refresh_special_attributes();
    }

    /// Remove attribute `name`, returning its previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<AttrValue> {
        let removed = self.attrs.remove(name);
        self.refresh_special_attributes();
        removed
    }

    fn refresh_special_attributes(&mut self) {
        self.id = match self.attrs.get("id") {
            Some(AttrValue::Text(id)) => Some(id.clone()),
            _ => None,
        };
        self.class_list = match self.attrs.get("class") {
            Some(AttrValue::Text(classes)) => {
                classes.split_whitespace().map(str::to_string).collect()
            }
            _ => Vec::new(),
        };
    }
}

/// Arena-based document tree.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// All nodes live in one vector and refer to each other by [`NodeId`]. Nodes
/// can be allocated detached and attached later with
/// [`DomTree::append_child`]; nothing is ever removed.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// The `:root` element is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the `:root` element.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Element(ElementData::new(ROOT_NAME)),
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: vec![root] }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached element.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.alloc(NodeType::Element(data))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Text(text.into()))
    }

    /// Allocate a detached comment or declaration.
    pub fn create_declaration(&mut self, content: impl Into<String>, kind: DeclarationKind) -> NodeId {
        self.alloc(NodeType::Declaration(DeclarationData {
            content: content.into(),
            kind,
        }))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent` and records `parent` as
    /// its parent. A node's parent is set exactly once.
    ///
    /// # Errors
    ///
    /// - [`DomError::UnknownNode`] if either id is not in this tree.
    /// - [`DomError::NotAnElement`] if `parent` is text or a declaration.
    /// - [`DomError::IsRoot`] if `child` is the document root.
    /// - [`DomError::AlreadyAttached`] if `child` already has a parent.
    /// - [`DomError::Cycle`] if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::UnknownNode(parent))?;
        if !matches!(parent_node.node_type, NodeType::Element(_)) {
            return Err(DomError::NotAnElement(parent));
        }
        let child_node = self.get(child).ok_or(DomError::UnknownNode(child))?;
        if child == NodeId::ROOT {
            return Err(DomError::IsRoot);
        }
        if child_node.parent.is_some() {
            return Err(DomError::AlreadyAttached(child));
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(DomError::Cycle { parent, child });
        }

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// `nodeName` of a node.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::node_name)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Pre-order walk over every element in the subtree rooted at `id`,
    /// starting with `id` itself when it is an element.
    ///
    /// The walk is lazy and driven by an explicit stack, so deep trees do
    /// not recurse.
    #[must_use]
    pub fn iter_elements(&self, id: NodeId) -> ElementIterator<'_> {
        let stack = if self.as_element(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        ElementIterator { tree: self, stack }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable element data. Attribute edits made through it keep the
    /// cached id and class list current.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get declaration data if this node is a comment or declaration.
    #[must_use]
    pub fn as_declaration(&self, id: NodeId) -> Option<&DeclarationData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Declaration(data) => Some(data),
            _ => None,
        })
    }

    /// Value of attribute `name` on element `id`.
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        self.as_element(id).and_then(|e| e.get_attribute(name))
    }

    /// True if element `id` has attribute `name`.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.as_element(id).is_some_and(|e| e.has_attribute(name))
    }

    /// Set attribute `name` on element `id`.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] or [`DomError::NotAnElement`].
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Result<(), DomError> {
        self.element_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    /// Remove attribute `name` from element `id`, returning the old value.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] or [`DomError::NotAnElement`].
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<AttrValue>, DomError> {
        Ok(self.element_mut(id)?.remove_attribute(name))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        if self.get(id).is_none() {
            return Err(DomError::UnknownNode(id));
        }
        self.as_element_mut(id).ok_or(DomError::NotAnElement(id))
    }

    /// Element children of `id`'s parent, in document order.
    ///
    /// With `skip_self`, `id` itself is left out. A node without a parent has
    /// no siblings.
    #[must_use]
    pub fn element_siblings(&self, id: NodeId, skip_self: bool) -> Vec<NodeId> {
        let Some(parent) = self.parent(id) else {
            return Vec::new();
        };
        self.children(parent)
            .iter()
            .copied()
            .filter(|&sibling| self.as_element(sibling).is_some())
            .filter(|&sibling| !skip_self || sibling != id)
            .collect()
    }

    /// Element siblings before `id`, in document order.
    #[must_use]
    pub fn previous_element_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let mut siblings = self.element_siblings(id, false);
        let position = siblings.iter().position(|&s| s == id).unwrap_or(siblings.len());
        siblings.truncate(position);
        siblings
    }

    /// Element siblings after `id`, in document order.
    #[must_use]
    pub fn next_element_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let siblings = self.element_siblings(id, false);
        match siblings.iter().position(|&s| s == id) {
            Some(position) => siblings[position + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    /// The nearest element sibling before `id`.
    #[must_use]
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let children = self.children(parent);
        let position = children.iter().position(|&c| c == id)?;
        children[..position]
            .iter()
            .rev()
            .copied()
            .find(|&c| self.as_element(c).is_some())
    }

    /// The nearest element sibling after `id`.
    #[must_use]
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let children = self.children(parent);
        let position = children.iter().position(|&c| c == id)?;
        children[position + 1..]
            .iter()
            .copied()
            .find(|&c| self.as_element(c).is_some())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the elements of a subtree.
///
/// Returned by [`DomTree::iter_elements`]. It is finite and single-pass;
/// call `iter_elements` again to restart.
pub struct ElementIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for ElementIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        self.stack.extend(
            tree.children(id)
                .iter()
                .rev()
                .copied()
                .filter(|&child| tree.as_element(child).is_some()),
        );
        Some(id)
    }
}
