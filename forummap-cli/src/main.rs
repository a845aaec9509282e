//! forummap CLI
//!
//! Extracts the forum category tree from a forum index page and prints it.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use forummap_html::Anchor;
use forummap_loader::{LoadOptions, load_forum_tree, parse_html_string};
use forummap_tree::ForumTree;
use forummap_tree::render::{render_markup, render_text};
use owo_colors::OwoColorize;

/// forummap: print the forum category tree of a forum index page
#[derive(Parser, Debug)]
#[command(name = "forummap")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of ./forums.html
    forummap

    # Read the page from standard input
    curl -s https://example.org/forum/ | forummap -

    # Nested JSON instead of text
    forummap --format json page.html

    # Parse inline HTML
    forummap --html '<div id="f-map"><ul></ul></div>'

    # The map lives in <nav id="menu">
    forummap --anchor-tag nav --anchor-id menu page.html

Set RUST_LOG=debug for diagnostics.
"#)]
struct Cli {
    /// Path to the HTML page, or - for standard input
    #[arg(value_name = "FILE", default_value = "forums.html")]
    path: String,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Tag name of the element holding the forum map
    #[arg(long, value_name = "TAG", default_value = "div")]
    anchor_tag: String,

    /// id attribute of the element holding the forum map
    #[arg(long, value_name = "ID", default_value = "f-map")]
    anchor_id: String,
}

/// How the tree is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented text: categories, then `[id]: title` per forum
    Text,
    /// Nested JSON objects
    Json,
    /// An HTML fragment in the page's own structure
    Markup,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "ERROR:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = LoadOptions {
        anchor: Anchor::with_id(cli.anchor_tag.to_ascii_lowercase(), cli.anchor_id.clone()),
    };

    let tree = if let Some(ref html) = cli.html {
        parse_html_string(html, &options)?
    } else {
        load_forum_tree(&cli.path, &options)?
    };
    log::info!("extracted {} forums", tree.len());

    write_tree(&tree, cli)
}

/// Print the tree to standard output in the requested format.
fn write_tree(tree: &ForumTree, cli: &Cli) -> Result<()> {
    let mut out = io::stdout().lock();
    match cli.format {
        Format::Text => render_text(tree, &mut out),
        Format::Json => {
            let json = serde_json::to_string_pretty(&tree.to_nested())
                .context("cannot serialize the forum tree")?;
            writeln!(out, "{json}")
        }
        Format::Markup => {
            render_markup(tree, &cli.anchor_id, &mut out).and_then(|()| writeln!(out))
        }
    }
    .context("cannot write output")?;
    out.flush().context("cannot write output")
}
