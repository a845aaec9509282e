use core::fmt;

use strum_macros::Display;

/// An attribute on a start tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A start tag: name, self-closing flag and attributes in source order.
///
/// The attribute list is only reachable while the token is in hand, which
/// makes [`Tag::attributes`] the attribute cursor of the tag just opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// "a tag name", ASCII-lowercased
    pub name: String,
    /// "a self-closing flag"
    pub self_closing: bool,
    /// "a list of attributes", duplicates kept in source order
    pub attributes: Vec<Attribute>,
}

impl Tag {
    /// Create a start tag without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper that appends an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// True if the tag declares at least one attribute.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Cursor over the tag's attributes in source order.
    pub fn attributes(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokens handed to the grammar. Unlike the character tokens of the
/// standard, consecutive character data is coalesced into one [`Token::Text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A DOCTYPE declaration.
    Doctype {
        /// The raw declaration content after `<!DOCTYPE`.
        data: String,
    },

    /// A start tag with its attributes.
    StartTag(Tag),

    /// An end tag. Attributes on end tags are dropped.
    EndTag {
        /// "a tag name", ASCII-lowercased
        name: String,
    },

    /// A run of character data, character references decoded.
    Text {
        /// The decoded text.
        data: String,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
    },
}

/// The kind of a [`Token`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    /// `<!DOCTYPE ...>`
    Doctype,
    /// `<name ...>`
    StartTag,
    /// `</name>`
    EndTag,
    /// Character data.
    Text,
    /// `<!-- ... -->`
    Comment,
}

impl Token {
    /// Create a text token.
    #[must_use]
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text { data: data.into() }
    }

    /// Create an end tag token.
    #[must_use]
    pub fn end_tag(name: impl Into<String>) -> Self {
        Self::EndTag { name: name.into() }
    }

    /// The kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Doctype { .. } => TokenKind::Doctype,
            Self::StartTag(_) => TokenKind::StartTag,
            Self::EndTag { .. } => TokenKind::EndTag,
            Self::Text { .. } => TokenKind::Text,
            Self::Comment { .. } => TokenKind::Comment,
        }
    }

    /// The tag name for start and end tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag(tag) => Some(&tag.name),
            Self::EndTag { name } => Some(name),
            _ => None,
        }
    }

    /// True for text tokens holding nothing but whitespace.
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text { data } if data.chars().all(char::is_whitespace))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { data } => write!(f, "<!DOCTYPE{data}>"),
            Self::StartTag(tag) => {
                write!(f, "<{}", tag.name)?;
                for attr in &tag.attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if tag.self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Text { data } => write!(f, "Text({})", data.escape_debug()),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
        }
    }
}
