//! Forum category tree for forummap.
//!
//! This crate provides an arena-based tree of forums as extracted from a
//! forum index page: top-level categories, each owning an ordered list of
//! sub-forums which may nest further.
//!
//! # Design
//!
//! The tree uses arena allocation with [`ForumId`] indices for all
//! relationships. A node's parent is stored as an index, so the back-reference
//! used to pop the build cursor never creates an ownership cycle.

mod builder;
pub mod render;

pub use builder::{TreeBuilder, TreeError};

use serde::Serialize;

/// A type-safe index into the forum tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForumId(pub usize);

impl ForumId {
    /// The root sentinel is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// One forum (or category) of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forum {
    /// The owning node. `None` only for the root sentinel.
    pub parent: Option<ForumId>,

    /// Numeric forum identifier taken from the link reference.
    /// Zero when the page does not carry one (categories usually don't).
    pub id: u32,

    /// Display title, trimmed and whitespace-collapsed.
    pub title: String,

    /// Sub-forums in document order.
    pub children: Vec<ForumId>,
}

/// Arena-based forum tree.
///
/// Index 0 holds a root sentinel that owns the categories; it has no id or
/// title and is never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumTree {
    nodes: Vec<Forum>,
}

impl ForumTree {
    /// Create a tree holding only the root sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Forum::default()],
        }
    }

    /// Get the root sentinel ID.
    #[must_use]
    pub const fn root(&self) -> ForumId {
        ForumId::ROOT
    }

    /// Get a forum by its ID.
    #[must_use]
    pub fn get(&self, id: ForumId) -> Option<&Forum> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a forum by its ID.
    pub fn get_mut(&mut self, id: ForumId) -> Option<&mut Forum> {
        self.nodes.get_mut(id.0)
    }

    /// Number of forums in the tree, not counting the root sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True if the tree holds no forums at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocate a new forum as the last child of `parent` and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn append_child(&mut self, parent: ForumId, id: u32, title: impl Into<String>) -> ForumId {
        let child = ForumId(self.nodes.len());
        self.nodes.push(Forum {
            parent: Some(parent),
            id,
            title: title.into(),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(child);
        child
    }

    /// Get the parent of a forum.
    #[must_use]
    pub fn parent(&self, id: ForumId) -> Option<ForumId> {
        self.get(id).and_then(|f| f.parent)
    }

    /// Get all children of a forum.
    #[must_use]
    pub fn children(&self, id: ForumId) -> &[ForumId] {
        self.get(id).map_or(&[], |f| f.children.as_slice())
    }

    /// The top-level categories, in document order.
    #[must_use]
    pub fn categories(&self) -> &[ForumId] {
        self.children(ForumId::ROOT)
    }

    /// Depth-first, pre-order traversal of every forum below the root.
    ///
    /// Categories have depth 0.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: self
                .categories()
                .iter()
                .rev()
                .map(|&id| (0, id))
                .collect(),
        }
    }

    /// Build an owned, nested copy of the categories for serialization.
    #[must_use]
    pub fn to_nested(&self) -> Vec<ForumNode> {
        self.categories()
            .iter()
            .map(|&id| self.nested(id))
            .collect()
    }

    fn nested(&self, id: ForumId) -> ForumNode {
        let forum = &self.nodes[id.0];
        ForumNode {
            id: forum.id,
            title: forum.title.clone(),
            children: forum.children.iter().map(|&c| self.nested(c)).collect(),
        }
    }
}

impl Default for ForumTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A forum visited by [`ForumTree::walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Nesting depth; categories are at depth 0.
    pub depth: usize,
    /// Arena index of the forum.
    pub forum: ForumId,
    /// Numeric forum identifier.
    pub id: u32,
    /// Display title.
    pub title: &'a str,
}

/// Pre-order iterator over a [`ForumTree`].
pub struct Walk<'a> {
    tree: &'a ForumTree,
    stack: Vec<(usize, ForumId)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, forum) = self.stack.pop()?;
        let node = self.tree.get(forum)?;
        self.stack
            .extend(node.children.iter().rev().map(|&c| (depth + 1, c)));
        Some(Entry {
            depth,
            forum,
            id: node.id,
            title: &node.title,
        })
    }
}

/// Owned, nested form of a forum used for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForumNode {
    /// Numeric forum identifier.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Sub-forums in document order.
    pub children: Vec<ForumNode>,
}
