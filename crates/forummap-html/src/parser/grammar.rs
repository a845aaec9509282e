//! The forum map grammar.
//!
//! The map is a list of categories, each holding a list of sub-forums which
//! may nest further lists of the same shape:
//!
//! ```html
//! <ul>
//!   <li>
//!     <span><span title="Games"></span></span>
//!     <ul>
//!       <li><span><a href="42">RPGs</a></span>
//!         <ul> ... </ul>
//!       </li>
//!     </ul>
//!   </li>
//! </ul>
//! ```
//!
//! Every `<li>` opens a forum on the [`TreeBuilder`] and closes it again when
//! the item ends, so the tree mirrors the list nesting.

use forummap_tree::{ForumTree, TreeBuilder};

use super::combinator::{
    Parser, Rule, action, content, enter, enter_action, enter_inspect, find_attribute, leave,
    maybe, parse_id, rec, repeat, repeat_to_end, seq, text_action,
};
use super::error::{ParseError, ParseResult};
use crate::tokenizer::{Tag, TokenSource};

/// The compiled forum map grammar.
///
/// Build it once and parse any number of documents with it.
pub struct ForumGrammar {
    root: Parser<TreeBuilder>,
    // Owns the recursive sub-forum list rule; `root` only refers to it weakly.
    _inner: Rule<TreeBuilder>,
}

impl ForumGrammar {
    /// Assemble the grammar.
    #[must_use]
    pub fn new() -> Self {
        let inner = Rule::new();

        let leaf = seq(vec![
            action(open_child),
            enter("span"),
            enter_action("a", |builder: &mut TreeBuilder, tag: &Tag| {
                let href = find_attribute("href", tag.attributes())?;
                builder.set_id(parse_id(href)?);
                Ok(())
            }),
            text_action(|builder: &mut TreeBuilder, title| {
                builder.set_title(title);
                Ok(())
            }),
            leave(),
            leave(),
            action(require_title),
            rec(&inner),
            action(close_child),
        ]);
        inner.define(maybe("ul", repeat("li", leaf)));

        let category = seq(vec![
            action(open_child),
            enter("span"),
            enter_inspect("span", |builder: &mut TreeBuilder, tag: &Tag| {
                if let Ok(title) = find_attribute("title", tag.attributes()) {
                    builder.set_title(title.to_string());
                }
                if let Ok(href) = find_attribute("href", tag.attributes()) {
                    builder.set_id(parse_id(href)?);
                }
                Ok(())
            }),
            content(|builder: &mut TreeBuilder, title| {
                if builder.title().is_empty() {
                    builder.set_title(title);
                }
                Ok(())
            }),
            leave(),
            rec(&inner),
            action(close_child),
        ]);

        // The page may end where the marker element would close; every list
        // inside it must be complete.
        Self {
            root: repeat_to_end("ul", repeat("li", category)),
            _inner: inner,
        }
    }

    /// Parse the forum map from `source`, which must be positioned just after
    /// the marker start tag.
    ///
    /// # Errors
    ///
    /// The first [`ParseError`] met; no partial tree is returned.
    pub fn parse(&self, source: &mut dyn TokenSource) -> ParseResult<ForumTree> {
        let mut builder = TreeBuilder::new();
        self.parse_into(source, &mut builder)?;
        Ok(builder.finish())
    }

    /// Parse into an existing builder, appending categories under its
    /// current forum.
    ///
    /// # Errors
    ///
    /// As for [`parse`](Self::parse). The builder may hold a partial tree
    /// afterwards.
    pub fn parse_into(
        &self,
        source: &mut dyn TokenSource,
        builder: &mut TreeBuilder,
    ) -> ParseResult {
        self.root.parse(source, builder)
    }
}

impl Default for ForumGrammar {
    fn default() -> Self {
        Self::new()
    }
}

fn open_child(builder: &mut TreeBuilder) -> ParseResult {
    builder.open_child();
    Ok(())
}

fn close_child(builder: &mut TreeBuilder) -> ParseResult {
    Ok(builder.close_child()?)
}

fn require_title(builder: &mut TreeBuilder) -> ParseResult {
    if builder.title().is_empty() {
        return Err(ParseError::MissingTitle);
    }
    Ok(())
}

/// Parse a forum map with a freshly built [`ForumGrammar`].
///
/// # Errors
///
/// See [`ForumGrammar::parse`].
pub fn parse_forums(source: &mut dyn TokenSource) -> ParseResult<ForumTree> {
    ForumGrammar::new().parse(source)
}
