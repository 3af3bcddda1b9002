//! Matching selector chains against a [`DomTree`].

use quokka_dom::{DomTree, NodeId};

use crate::parser::{Combinator, SelectorChain, SelectorError, SelectorList};

impl SelectorList {
    /// True if `node` is an element matched by any chain of the list.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.chains()
            .iter()
            .any(|chain| match_chain(tree, node, chain, false))
    }

    /// First element in pre-order under `scope` (inclusive) that matches.
    #[must_use]
    pub fn query_first(&self, tree: &DomTree, scope: NodeId) -> Option<NodeId> {
        tree.iter_elements(scope).find(|&id| self.matches(tree, id))
    }

    /// Every element under `scope` (inclusive) that matches, in document
    /// order.
    #[must_use]
    pub fn query_all(&self, tree: &DomTree, scope: NodeId) -> Vec<NodeId> {
        tree.iter_elements(scope)
            .filter(|&id| self.matches(tree, id))
            .collect()
    }
}

/// Match `node` against the chain whose head is `link`.
///
/// With `parent_can_match`, a node whose checkers fail hands the same link
/// on to its parent, which is how a descendant combinator finds an ancestor
/// at any distance. Once the checkers pass, the result is decided by the
/// links to the left and no further ancestor is tried.
fn match_chain(tree: &DomTree, node: NodeId, link: &SelectorChain, parent_can_match: bool) -> bool {
    let Some(element) = tree.as_element(node) else {
        return false;
    };

    if link.checkers().iter().all(|checker| checker.matches(element)) {
        return match_predecessor(tree, node, link);
    }

    parent_can_match
        && tree
            .parent(node)
            .is_some_and(|parent| match_chain(tree, parent, link, true))
}

/// Check the links to the left of `link`, given that `link` matched `node`.
fn match_predecessor(tree: &DomTree, node: NodeId, link: &SelectorChain) -> bool {
    let Some(previous) = link.predecessor() else {
        return true;
    };

    match link.combinator() {
        Combinator::Descendant => tree
            .parent(node)
            .is_some_and(|parent| match_chain(tree, parent, previous, true)),
        Combinator::Child => tree
            .parent(node)
            .is_some_and(|parent| match_chain(tree, parent, previous, false)),
        Combinator::NextSibling => tree
            .previous_element_sibling(node)
            .is_some_and(|sibling| match_chain(tree, sibling, previous, false)),
        Combinator::SubsequentSibling => tree
            .previous_element_siblings(node)
            .into_iter()
            .any(|sibling| match_chain(tree, sibling, previous, false)),
    }
}

/// Parse `selector` and test it against `node`.
///
/// # Errors
///
/// Returns a [`SelectorError`] if `selector` does not parse.
pub fn matches(tree: &DomTree, node: NodeId, selector: &str) -> Result<bool, SelectorError> {
    Ok(SelectorList::parse(selector)?.matches(tree, node))
}

/// Parse `selector` and return the first match under `scope`, or `None`.
///
/// # Errors
///
/// Returns a [`SelectorError`] if `selector` does not parse.
pub fn query_selector(
    tree: &DomTree,
    scope: NodeId,
    selector: &str,
) -> Result<Option<NodeId>, SelectorError> {
    Ok(SelectorList::parse(selector)?.query_first(tree, scope))
}

/// Parse `selector` and return every match under `scope` in document order.
///
/// # Errors
///
/// Returns a [`SelectorError`] if `selector` does not parse.
pub fn query_selector_all(
    tree: &DomTree,
    scope: NodeId,
    selector: &str,
) -> Result<Vec<NodeId>, SelectorError> {
    Ok(SelectorList::parse(selector)?.query_all(tree, scope))
}
