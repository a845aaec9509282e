//! Errors raised while parsing the forum map.

use std::io;

use forummap_tree::TreeError;
use thiserror::Error;

use crate::tokenizer::{SourceError, TokenKind};

/// Result alias used by every parser.
pub type ParseResult<T = ()> = Result<T, ParseError>;

/// Why a parse failed. Every failure aborts the whole parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input ended where more tokens were required.
    #[error("unexpected end of input")]
    PrematureEnd,

    /// The token source could not read its input.
    #[error("read error: {0}")]
    Io(#[source] io::Error),

    /// A token of the wrong kind.
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        /// The kind the grammar required.
        expected: TokenKind,
        /// The kind actually read.
        found: TokenKind,
    },

    /// A start tag with the wrong name.
    #[error("unexpected tag: expected <{expected}>, found <{found}>")]
    UnexpectedTag {
        /// The tag name the grammar required.
        expected: String,
        /// The tag name actually read.
        found: String,
    },

    /// A tag that must carry attributes has none.
    #[error("<{tag}> has no attributes")]
    MissingAttributes {
        /// Name of the bare tag.
        tag: String,
    },

    /// A required attribute is absent or empty.
    #[error("attribute '{name}' not found")]
    MissingAttribute {
        /// The attribute key looked up.
        name: String,
    },

    /// A sub-forum link without text.
    #[error("forum title is missing")]
    MissingTitle,

    /// A forum reference that holds no number.
    #[error("invalid forum id '{value}'")]
    InvalidId {
        /// The offending attribute value.
        value: String,
    },

    /// The input ended before the marker element appeared.
    #[error("marker <{tag} {attribute}=\"{value}\"> not found")]
    AnchorNotFound {
        /// Marker tag name.
        tag: String,
        /// Marker attribute key.
        attribute: String,
        /// Marker attribute value.
        value: String,
    },

    /// A recursive rule ran before it was defined.
    #[error("grammar rule used before it was defined")]
    UndefinedRule,

    /// The build cursor was moved out of bounds.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl From<SourceError> for ParseError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::EndOfInput => Self::PrematureEnd,
            SourceError::Io(e) => Self::Io(e),
        }
    }
}
