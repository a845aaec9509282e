//! Build cursor for constructing a [`ForumTree`] while parsing.

use thiserror::Error;

use crate::{ForumId, ForumTree};

/// Errors raised by the build cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A close step ran with no forum open.
    #[error("cannot step above the root forum")]
    AtRoot,
}

/// A forum tree under construction together with its build cursor.
///
/// Each [`open_child`](Self::open_child) appends a new forum to the current
/// one and descends into it; [`close_child`](Self::close_child) climbs back to
/// the parent. Opens and closes nest exactly like the markup they mirror.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    tree: ForumTree,
    current: ForumId,
}

impl TreeBuilder {
    /// Start a new tree with the cursor on the root sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: ForumTree::new(),
            current: ForumId::ROOT,
        }
    }

    /// Append an empty forum to the current one and make it current.
    pub fn open_child(&mut self) {
        self.current = self.tree.append_child(self.current, 0, String::new());
    }

    /// Make the parent of the current forum current again.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AtRoot`] if no forum is open.
    pub fn close_child(&mut self) -> Result<(), TreeError> {
        self.current = self.tree.parent(self.current).ok_or(TreeError::AtRoot)?;
        Ok(())
    }

    /// Set the numeric identifier of the current forum.
    pub fn set_id(&mut self, id: u32) {
        if let Some(forum) = self.tree.get_mut(self.current) {
            forum.id = id;
        }
    }

    /// Set the title of the current forum.
    pub fn set_title(&mut self, title: String) {
        if let Some(forum) = self.tree.get_mut(self.current) {
            forum.title = title;
        }
    }

    /// Title of the current forum so far.
    #[must_use]
    pub fn title(&self) -> &str {
        self.tree.get(self.current).map_or("", |f| f.title.as_str())
    }

    /// Finish building and return the tree.
    #[must_use]
    pub fn finish(self) -> ForumTree {
        self.tree
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
