//! Parsing the forum map out of a token stream.
//!
//! [`anchor`] finds where the map starts, [`combinator`] provides the
//! building blocks and [`grammar`] puts them together into the forum map
//! grammar.

/// Locating the marker element.
pub mod anchor;
/// Generic token-level parser combinators.
pub mod combinator;
/// Parse errors.
pub mod error;
/// The forum map grammar.
pub mod grammar;

pub use anchor::{Anchor, seek_anchor};
pub use combinator::{Parser, Rule};
pub use error::{ParseError, ParseResult};
pub use grammar::{ForumGrammar, parse_forums};
