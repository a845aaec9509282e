//! Document loading for forummap.
//!
//! # Scope
//!
//! This crate ties the pieces together:
//! - **Input** - a file path, `-` for standard input, any reader or a string
//! - **Parsing** - tokenizer, marker seek and forum map grammar
//! - **Draining** - the unread rest of the input is consumed after a
//!   successful parse, so a producer piping into us can finish cleanly
//!
//! The input is read exactly once and never held in memory as a whole. A file
//! is closed when loading returns, on success and on failure alike.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use forummap_common::warning::clear_warnings;
use forummap_html::{Anchor, ForumGrammar, HTMLTokenizer, ParseError, seek_anchor};
use forummap_tree::ForumTree;
use thiserror::Error;

pub use forummap_html as html;
pub use forummap_tree as tree;

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file could not be opened.
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        /// The path given.
        path: PathBuf,
        /// Why opening failed.
        source: io::Error,
    },

    /// The document does not hold a valid forum map.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading the rest of the input after the map failed.
    #[error("cannot drain input: {0}")]
    Drain(#[source] io::Error),
}

/// How to find the forum map in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// The element the map lives in.
    pub anchor: Anchor,
}

/// Load the forum tree from the file at `path`, or from standard input if
/// `path` is `-`.
///
/// # Errors
///
/// [`LoadError::Open`] if the file cannot be opened, otherwise as for
/// [`read_forum_tree`].
pub fn load_forum_tree(path: impl AsRef<Path>, options: &LoadOptions) -> Result<ForumTree, LoadError> {
    let path = path.as_ref();
    if path == Path::new(STDIN_PATH) {
        log::debug!("reading standard input");
        return read_forum_tree(io::stdin().lock(), options);
    }

    log::debug!("reading {}", path.display());
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_forum_tree(file, options)
}

/// Load the forum tree from `reader`.
///
/// The reader is consumed to its end when parsing succeeds; after a failure
/// it is left where parsing stopped.
///
/// # Errors
///
/// [`LoadError::Parse`] if the marker is missing or the map is malformed,
/// [`LoadError::Drain`] if reading the rest of the input fails.
pub fn read_forum_tree<R: Read>(reader: R, options: &LoadOptions) -> Result<ForumTree, LoadError> {
    clear_warnings();

    let mut tokenizer = HTMLTokenizer::new(reader);
    seek_anchor(&mut tokenizer, &options.anchor)?;
    let tree = ForumGrammar::new().parse(&mut tokenizer)?;
    log::debug!(
        "parsed {} forums in {} categories",
        tree.len(),
        tree.categories().len()
    );

    let drained = io::copy(&mut tokenizer.into_reader(), &mut io::sink()).map_err(LoadError::Drain)?;
    log::debug!("drained {drained} bytes after the forum map");
    Ok(tree)
}

/// Parse the forum tree out of an HTML string.
///
/// Use this when you already have the HTML content as a string.
///
/// # Errors
///
/// As for [`read_forum_tree`].
pub fn parse_html_string(html: &str, options: &LoadOptions) -> Result<ForumTree, LoadError> {
    read_forum_tree(html.as_bytes(), options)
}
