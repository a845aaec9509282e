//! Positioning the token source at the marker element.

use super::error::{ParseError, ParseResult};
use crate::tokenizer::{SourceError, Token, TokenSource};

/// The marker element the forum map lives in: a start tag `tag` carrying
/// `attribute="value"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Tag name, lowercase.
    pub tag: String,
    /// Attribute key, lowercase.
    pub attribute: String,
    /// Attribute value, matched exactly.
    pub value: String,
}

impl Anchor {
    /// An anchor on `<tag id="id">`.
    #[must_use]
    pub fn with_id(tag: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attribute: "id".to_string(),
            value: id.into(),
        }
    }

    /// True if `token` is the marker start tag.
    #[must_use]
    pub fn matches(&self, token: &Token) -> bool {
        match token {
            Token::StartTag(tag) if tag.name == self.tag => tag
                .attributes()
                .any(|attr| attr.name == self.attribute && attr.value == self.value),
            _ => false,
        }
    }
}

impl Default for Anchor {
    /// `<div id="f-map">`
    fn default() -> Self {
        Self::with_id("div", "f-map")
    }
}

/// Discard tokens up to and including the marker start tag.
///
/// Each token is dropped as soon as it has been examined.
///
/// # Errors
///
/// [`ParseError::AnchorNotFound`] if the input ends first, [`ParseError::Io`]
/// if reading fails.
pub fn seek_anchor(source: &mut dyn TokenSource, anchor: &Anchor) -> ParseResult {
    let mut skipped: usize = 0;
    loop {
        match source.next_token() {
            Ok(token) if anchor.matches(&token) => {
                log::debug!(
                    "found <{} {}=\"{}\"> after {skipped} tokens",
                    anchor.tag,
                    anchor.attribute,
                    anchor.value
                );
                return Ok(());
            }
            Ok(_) => skipped += 1,
            Err(SourceError::EndOfInput) => {
                log::debug!("input ended after {skipped} tokens without the marker");
                return Err(ParseError::AnchorNotFound {
                    tag: anchor.tag.clone(),
                    attribute: anchor.attribute.clone(),
                    value: anchor.value.clone(),
                });
            }
            Err(SourceError::Io(e)) => return Err(ParseError::Io(e)),
        }
    }
}
