//! Renderers for a finished [`ForumTree`].
//!
//! - [`render_text`] prints the indented plain-text listing
//! - [`render_markup`] regenerates the index-page fragment the forum grammar
//!   reads, so a tree can be fed back through the parser

use std::io::{self, Write};

use crate::{Entry, ForumTree};

/// Write the plain-text listing of `tree` to `out`.
///
/// Categories are printed as their bare title; deeper forums as
/// `"\t" * depth + "[id]: title"`, one per line.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render_text<W: Write>(tree: &ForumTree, out: &mut W) -> io::Result<()> {
    for entry in tree.walk() {
        writeln!(out, "{}", text_line(&entry))?;
    }
    Ok(())
}

/// Render the plain-text listing into a string.
#[must_use]
pub fn text_to_string(tree: &ForumTree) -> String {
    let mut text = String::new();
    for entry in tree.walk() {
        text.push_str(&text_line(&entry));
        text.push('\n');
    }
    text
}

fn text_line(entry: &Entry<'_>) -> String {
    if entry.depth == 0 {
        entry.title.to_string()
    } else {
        format!("{}[{}]: {}", "\t".repeat(entry.depth), entry.id, entry.title)
    }
}

/// Write `tree` back out as an index-page fragment.
///
/// The fragment is a `<div id="{marker_id}">` holding one `<ul>` per
/// category. Category titles go into the `title` attribute of the inner
/// `<span>`; sub-forums become `<li><span><a href="id">title</a></span></li>`
/// items, nested through further `<ul>` lists.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render_markup<W: Write>(tree: &ForumTree, marker_id: &str, out: &mut W) -> io::Result<()> {
    out.write_all(markup_to_string(tree, marker_id).as_bytes())
}

/// Render the markup fragment into a string.
#[must_use]
pub fn markup_to_string(tree: &ForumTree, marker_id: &str) -> String {
    let mut html = format!("<div id=\"{}\">", escape(marker_id));
    // Depth of the item left open by the previous entry.
    let mut open: Option<usize> = None;
    for entry in tree.walk() {
        match open {
            Some(depth) if entry.depth > depth => html.push_str("<ul>"),
            Some(depth) => close_items(&mut html, depth, entry.depth),
            None => {}
        }
        if entry.depth == 0 {
            html.push_str("<ul><li><span><span");
            if !entry.title.is_empty() {
                html.push_str(&format!(" title=\"{}\"", escape(entry.title)));
            }
            if entry.id != 0 {
                html.push_str(&format!(" href=\"{}\"", entry.id));
            }
            html.push_str("></span></span>");
        } else {
            html.push_str(&format!(
                "<li><span><a href=\"{}\">{}</a></span>",
                entry.id,
                escape(entry.title)
            ));
        }
        open = Some(entry.depth);
    }
    if let Some(depth) = open {
        close_items(&mut html, depth, 0);
    }
    html.push_str("</div>");
    html
}

/// Close the open item at `from` and every enclosing item down to `to`.
fn close_items(html: &mut String, from: usize, to: usize) {
    close_item(html, from);
    for depth in (to..from).rev() {
        html.push_str("</ul>");
        close_item(html, depth);
    }
}

fn close_item(html: &mut String, depth: usize) {
    if depth == 0 {
        html.push_str("</li></ul>");
    } else {
        html.push_str("</li>");
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"Q&A <"x">"#), "Q&amp;A &lt;&quot;x&quot;&gt;");
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let tree = ForumTree::new();
        assert_eq!(text_to_string(&tree), "");
        assert_eq!(markup_to_string(&tree, "f-map"), "<div id=\"f-map\"></div>");
    }
}
