//! Tests for selector matching and querying.

use quokka_common::warning::was_warned;
use quokka_dom::{DomTree, NodeId};
use quokka_html::parse_document;
use quokka_selector::{SelectorList, matches, query_selector, query_selector_all};

/// Parse `html` and return the tree and its first top-level node.
fn first_node(html: &str) -> (DomTree, NodeId) {
    let tree = parse_document(html);
    let first = tree.children(NodeId::ROOT)[0];
    (tree, first)
}

fn assert_matches(selector: &str, html: &str) {
    let (tree, node) = first_node(html);
    assert!(
        matches(&tree, node, selector).unwrap(),
        "`{selector}` should match {html}"
    );
}

fn assert_no_match(selector: &str, html: &str) {
    let (tree, node) = first_node(html);
    assert!(
        !matches(&tree, node, selector).unwrap(),
        "`{selector}` should not match {html}"
    );
}

fn count(tree: &DomTree, selector: &str) -> usize {
    query_selector_all(tree, NodeId::ROOT, selector).unwrap().len()
}

fn id_of(tree: &DomTree, node: NodeId) -> Option<&str> {
    tree.as_element(node).and_then(|e| e.id())
}

#[test]
fn test_class_list_matching() {
    assert_matches(".button.green", "<button class='button green'>button</button>");
    assert_matches(".green.button", "<button class='button green'>button</button>");
    assert_matches(".button.green", "<button class='green button'>button</button>");
    assert_no_match(".button.green", "<button class='button'>button</button>");
}

#[test]
fn test_id_and_class_matching() {
    assert_matches(
        ".button.green#saveBtn",
        "<button id='saveBtn' class='button green'>button</button>",
    );
    assert_no_match(
        ".button.green#saveBtn",
        "<button class='button green'>button</button>",
    );
}

#[test]
fn test_tag_matching_ignores_ascii_case() {
    assert_matches("div", "<DIV>x</DIV>");
    assert_matches("DIV", "<div>x</div>");
    assert_no_match("span", "<div>x</div>");
}

#[test]
fn test_attribute_equals() {
    assert_matches("[type='text']", "<input type='text'>");
    assert_no_match("[type='text']", "<input type='number'>");
    assert_no_match("[type='text']", "<input>");
}

#[test]
fn test_attribute_prefix_suffix_substring() {
    assert_matches("[class^='php']", "<code class='php'></code>");
    assert_no_match("[class^='sql']", "<code class='php'></code>");
    assert_no_match("[class^=php]", "<code class='language-php'></code>");

    assert_matches("[class$='php']", "<code class='language-php'></code>");
    assert_no_match("[class$='sql']", "<code class='language-php'></code>");

    assert_matches("[class*='php']", "<code class='language-php'></code>");
    assert_matches("[class*='php']", "<code class='language php snippet'></code>");
    assert_no_match("[class*='sql']", "<code class='language php snippet'></code>");
}

#[test]
fn test_attribute_includes_word() {
    assert_matches("[class~='php']", "<code class='language php snippet'></code>");
    assert_no_match("[class~='lang']", "<code class='language php snippet'></code>");
}

#[test]
fn test_attribute_dash_match() {
    assert_matches("[class|='language']", "<code class='language'></code>");
    assert_matches("[class|='language']", "<code class='language-php'></code>");
    assert_no_match("[class|='language']", "<code class='php language'></code>");
    assert_no_match("[class|='language']", "<code class='languages'></code>");
}

#[test]
fn test_attribute_case_flag() {
    let html = "<a data-kind='Primary'></a>";
    assert_matches("[data-kind=primary i]", html);
    assert_matches("[data-kind=\"PRIMARY\" i]", html);
    assert_matches("[data-kind^=PRI i]", html);
    assert_no_match("[data-kind=primary]", html);
    assert_no_match("[data-kind=primary s]", html);
}

#[test]
fn test_flag_attribute_compares_as_empty() {
    assert_matches("[disabled]", "<input disabled>");
    assert_matches("[disabled='']", "<input disabled>");
    assert_no_match("[disabled=disabled]", "<input disabled>");
}

#[test]
fn test_pseudo_class_matches_as_if_absent() {
    assert_matches("button:hover", "<button>ok</button>");
    assert_no_match("a:hover", "<button>ok</button>");
    assert!(was_warned(
        "Selector",
        "pseudo-class `:hover` is not supported and matches everything"
    ));
}

#[test]
fn test_non_elements_never_match() {
    let tree = parse_document("<!-- note -->text<p>x</p>");
    let children = tree.children(NodeId::ROOT).to_vec();
    assert!(!matches(&tree, children[0], "*").unwrap());
    assert!(!matches(&tree, children[1], "*").unwrap());
    assert!(matches(&tree, children[2], "*").unwrap());
}

#[test]
fn test_sibling_combinators() {
    let tree = parse_document("<h1>Title</h1><a href=''></a><a></a><a href=''></a>");
    let links: Vec<NodeId> = tree.children(NodeId::ROOT)[1..].to_vec();

    assert_eq!(
        query_selector_all(&tree, NodeId::ROOT, "h1 + a").unwrap(),
        vec![links[0]]
    );
    assert_eq!(
        query_selector_all(&tree, NodeId::ROOT, "h1 ~ a").unwrap(),
        links
    );
}

#[test]
fn test_next_sibling_without_previous_sibling_fails_cleanly() {
    let tree = parse_document("<div><a></a></div>");
    assert!(query_selector_all(&tree, NodeId::ROOT, "h1 + a").unwrap().is_empty());
    assert!(query_selector_all(&tree, NodeId::ROOT, "h1 ~ a").unwrap().is_empty());
}

#[test]
fn test_siblings_skip_text_nodes() {
    let tree = parse_document("<h1>t</h1> some text <a></a>");
    assert_eq!(count(&tree, "h1 + a"), 1);
}

#[test]
fn test_query_selector_document() {
    let tree = parse_document(
        "
        <nav>
            <h1 class='title'>App!</h1>
            <a href=''>Home<a>
        </nav>
        <body>
            <button id='myButton'></button>

            <div>
                <b>Warning !</b>
                <label>Hello</label>
                <input type='text'>
            </div>

            <
        </body>
        ",
    );
    let find = |selector: &str| query_selector(&tree, NodeId::ROOT, selector).unwrap();

    assert!(find("body > button").is_some());
    assert!(find("body > div > b").is_some());
    assert!(find("body > b").is_none());

    assert!(find("button").is_some());
    assert!(find("body button").is_some());
    assert!(find("body div b").is_some());
    assert!(find("div button").is_none());

    assert!(find("h1 + a").is_some());
    assert!(find("h1 + button").is_none());

    assert!(find("h1 ~ a").is_some());
    assert!(find("h1 ~ button").is_none());

    let button = find("#myButton").unwrap();
    assert_eq!(tree.node_name(button), Some("button"));
}

#[test]
fn test_query_selector_all_counts() {
    let tree = parse_document(
        "
        <section id='first'>
            <a href=''></a>
            <a></a>
            <a href=''></a>
        </section>
        <div id='second'>
            <a></a>
            <a href=''></a>
            <a href=''></a>
        </div>
        ",
    );
    assert_eq!(count(&tree, "a"), 6);
    assert_eq!(count(&tree, "#first a"), 3);
    assert_eq!(count(&tree, "#second a"), 3);
    assert_eq!(count(&tree, "a[href]"), 4);
    assert_eq!(count(&tree, "div a, section a"), 6);
}

#[test]
fn test_query_selector_all_combinators() {
    let tree = parse_document(
        "
        <section id='first'>
            <h1>Title</h1>
            <a href=''></a>
            <a></a>
            <a href=''></a>
        </section>
        <div id='second'>
            <a></a>
            <section>
                <h1 id='secondTitle'></h1>
                <a href=''></a>
                <a href=''></a>
            </section>
        </div>
        ",
    );
    assert_eq!(count(&tree, "a"), 6);
    assert_eq!(count(&tree, "div a"), 3);
    assert_eq!(count(&tree, "h1 + a"), 2);
    assert_eq!(count(&tree, "h1 ~ a"), 5);
    assert_eq!(count(&tree, "#secondTitle ~ a"), 2);
}

#[test]
fn test_descendant_search_stops_at_nearest_matching_ancestor() {
    // The nearest `div` above `p` satisfies `div`, so its parent must be the
    // `section`; the outer `div` is never tried.
    let tree = parse_document("<section><div><div><p>x</p></div></div></section>");
    assert_eq!(count(&tree, "section > div p"), 0);
    assert_eq!(count(&tree, "section > div > div p"), 1);
    assert_eq!(count(&tree, "section div p"), 1);

    let tree = parse_document("<section><div><p>x</p></div></section>");
    assert_eq!(count(&tree, "section > div p"), 1);
}

#[test]
fn test_selector_list_matches_each_element_once() {
    let tree = parse_document("<a href='1'></a><a></a>");
    assert_eq!(count(&tree, "a, a[href], [href]"), 2);
}

#[test]
fn test_results_are_in_document_order() {
    let tree = parse_document(
        "<div id='a'><p id='b'></p></div><p id='c'><span id='d'></span></p>",
    );
    let ids: Vec<&str> = query_selector_all(&tree, NodeId::ROOT, "span, p, div")
        .unwrap()
        .into_iter()
        .filter_map(|n| id_of(&tree, n))
        .collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_query_is_scoped_to_subtree() {
    let tree = parse_document("<ul id='one'><li>a</li></ul><ul id='two'><li>b</li><li>c</li></ul>");
    let two = query_selector(&tree, NodeId::ROOT, "#two").unwrap().unwrap();
    assert_eq!(query_selector_all(&tree, two, "li").unwrap().len(), 2);
    // The scope itself is a candidate.
    assert_eq!(query_selector(&tree, two, "ul").unwrap(), Some(two));
    // Combinators may still look above the scope.
    assert_eq!(query_selector_all(&tree, two, "#two li").unwrap().len(), 2);
}

#[test]
fn test_root_element_is_a_candidate() {
    let tree = parse_document("<p></p>");
    let all = query_selector_all(&tree, NodeId::ROOT, "*").unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], NodeId::ROOT);
}

#[test]
fn test_no_match_is_none_and_empty() {
    let tree = parse_document("<p></p>");
    assert_eq!(query_selector(&tree, NodeId::ROOT, "table").unwrap(), None);
    assert!(query_selector_all(&tree, NodeId::ROOT, "table").unwrap().is_empty());
}

#[test]
fn test_invalid_selector_is_an_error() {
    let tree = parse_document("<p></p>");
    assert!(query_selector(&tree, NodeId::ROOT, "p[").is_err());
    assert!(query_selector_all(&tree, NodeId::ROOT, "").is_err());
    assert!(matches(&tree, NodeId::ROOT, ")").is_err());
}

#[test]
fn test_attribute_changes_are_seen_by_matching() {
    let mut tree = parse_document("<button class='primary'>Go</button>");
    let button = tree.children(NodeId::ROOT)[0];

    assert!(matches(&tree, button, ".primary").unwrap());
    tree.set_attribute(button, "class", "secondary").unwrap();
    assert!(!matches(&tree, button, ".primary").unwrap());
    assert!(matches(&tree, button, ".secondary").unwrap());

    tree.set_attribute(button, "id", "go").unwrap();
    assert!(matches(&tree, button, "button#go").unwrap());
    let _ = tree.remove_attribute(button, "id").unwrap();
    assert!(!matches(&tree, button, "#go").unwrap());
}

#[test]
fn test_compiled_list_is_reusable_across_trees() {
    let list = SelectorList::parse("li.done").unwrap();
    let first = parse_document("<ul><li class='done'></li><li></li></ul>");
    let second = parse_document("<ol><li class='done'></li><li class='done'></li></ol>");
    assert_eq!(list.query_all(&first, NodeId::ROOT).len(), 1);
    assert_eq!(list.query_all(&second, NodeId::ROOT).len(), 2);
    assert_eq!(list.query_all(&first, NodeId::ROOT).len(), 1);
}
