//! Property tests for matching.

use quickcheck_macros::quickcheck;
use quokka_dom::{DomTree, NodeId};
use quokka_html::parse_document;
use quokka_selector::SelectorList;

const DOCUMENT: &str = "
    <main id='app'>
        <h1 class='title'>Title</h1>
        <nav><a href='/' class='active'>Home</a><a href='/about'>About</a></nav>
        <section class='cards'>
            <article class='card featured'><p>One</p><a href='/one'>more</a></article>
            <article class='card'><p>Two</p><p lang='en-US'>Three</p></article>
        </section>
        <footer><p>fine print</p><input type='text' disabled></footer>
    </main>
";

const SELECTORS: &[&str] = &[
    "*",
    "a",
    "p",
    "main a",
    "nav > a",
    "h1 + nav",
    "h1 ~ section",
    "article p + p",
    ".card.featured a",
    "[href^='/a']",
    "[lang|=en]",
    "section article > p",
    "footer [disabled]",
    "a.active, p, #app",
];

fn pick(picks: &[u8]) -> Vec<&'static str> {
    picks
        .iter()
        .map(|p| SELECTORS[usize::from(*p) % SELECTORS.len()])
        .collect()
}

fn document() -> DomTree {
    parse_document(DOCUMENT)
}

#[quickcheck]
fn prop_matching_is_idempotent(picks: Vec<u8>) -> bool {
    let tree = document();
    pick(&picks).into_iter().all(|selector| {
        let list = SelectorList::parse(selector).unwrap();
        list.query_all(&tree, NodeId::ROOT) == list.query_all(&tree, NodeId::ROOT)
    })
}

#[quickcheck]
fn prop_query_first_is_head_of_query_all(picks: Vec<u8>) -> bool {
    let tree = document();
    pick(&picks).into_iter().all(|selector| {
        let list = SelectorList::parse(selector).unwrap();
        list.query_first(&tree, NodeId::ROOT) == list.query_all(&tree, NodeId::ROOT).first().copied()
    })
}

#[quickcheck]
fn prop_query_all_agrees_with_matches(picks: Vec<u8>) -> bool {
    let tree = document();
    pick(&picks).into_iter().all(|selector| {
        let list = SelectorList::parse(selector).unwrap();
        let expected: Vec<NodeId> = tree
            .iter_elements(NodeId::ROOT)
            .filter(|&id| list.matches(&tree, id))
            .collect();
        list.query_all(&tree, NodeId::ROOT) == expected
    })
}

#[quickcheck]
fn prop_list_is_union_of_alternatives(first: u8, second: u8) -> bool {
    let tree = document();
    let [a, b] = [first, second].map(|p| SELECTORS[usize::from(p) % SELECTORS.len()]);
    let union = SelectorList::parse(&format!("{a}, {b}")).unwrap();
    let left = SelectorList::parse(a).unwrap();
    let right = SelectorList::parse(b).unwrap();
    tree.iter_elements(NodeId::ROOT).all(|id| {
        union.matches(&tree, id) == (left.matches(&tree, id) || right.matches(&tree, id))
    })
}
