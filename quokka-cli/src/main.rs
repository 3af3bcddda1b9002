//! Quokka CLI
//!
//! Parse an HTML document and query it with CSS selectors from the terminal.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use quokka_dom::{DomTree, NodeId};
use quokka_html::{HtmlParser, ParseIssue, ParserConfig, read_html};
use quokka_html::config::DEFAULT_MAX_DEPTH;
use quokka_selector::SelectorList;

use render::render_tree;

/// Quokka - query HTML documents with CSS selectors
#[derive(Parser, Debug)]
#[command(name = "quokka")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the document tree
    quokka ./index.html

    # Print every link inside the navigation
    quokka ./index.html -s 'nav a[href]'

    # Print the text of the first heading
    quokka ./index.html -s h1 --first --text

    # Query inline HTML and show recovered markup problems
    quokka --html '<ul><li>one<li>two</ul>' -s li --issues
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Selector to query; matches are printed one per line
    #[arg(short = 's', long, value_name = "SELECTOR")]
    selector: Option<String>,

    /// Stop at the first match
    #[arg(long, requires = "selector")]
    first: bool,

    /// Print the text content of matches instead of their markup
    #[arg(long, requires = "selector")]
    text: bool,

    /// Print the document tree (the default when no selector is given)
    #[arg(long)]
    tree: bool,

    /// Print markup problems recovered from while parsing
    #[arg(long)]
    issues: bool,

    /// Nesting depth beyond which element content is kept as text
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let html = load_html(&cli)?;
    let config = ParserConfig::default().with_max_depth(cli.max_depth);
    let (tree, issues) = HtmlParser::new(&html).with_config(config).run_with_issues();

    if cli.tree || cli.selector.is_none() {
        println!("{}", "=== DOM Tree ===".bold());
        print!("{}", render_tree(&tree, tree.root()));
    }

    let mut found = true;
    if let Some(ref selector) = cli.selector {
        let list = SelectorList::parse(selector)
            .with_context(|| format!("invalid selector `{selector}`"))?;
        let matches = run_query(&list, &tree, cli.first);
        found = !matches.is_empty();

        if cli.tree {
            println!("\n{}", format!("=== Matches ({}) ===", matches.len()).bold());
        }
        for id in matches {
            if cli.text {
                println!("{}", tree.inner_text(id));
            } else {
                println!("{}", tree.outer_html(id));
            }
        }
        if !found {
            eprintln!("{}", format!("no element matches `{list}`").dimmed());
        }
    }

    if cli.issues {
        print_issues(&issues);
    }

    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Load HTML from the CLI arguments.
fn load_html(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        read_html(path).with_context(|| format!("could not load {}", path.display()))
    } else {
        bail!("no input: pass a FILE or --html '<p>...</p>'")
    }
}

fn run_query(list: &SelectorList, tree: &DomTree, first: bool) -> Vec<NodeId> {
    if first {
        list.query_first(tree, tree.root()).into_iter().collect()
    } else {
        list.query_all(tree, tree.root())
    }
}

fn print_issues(issues: &[ParseIssue]) {
    println!("\n{}", "=== Parse Issues ===".bold());
    if issues.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for issue in issues {
        println!(
            "  - {} {}",
            format!("@{}", issue.offset).yellow(),
            issue.message
        );
    }
}
