//! Token-level parser combinators.
//!
//! A [`Parser`] consumes tokens from a [`TokenSource`] and either succeeds,
//! having advanced the source and possibly updated the caller's state `S`,
//! or fails with a [`ParseError`]. Parsers never backtrack: a consumed token
//! is gone, so grammars built from these pieces must decide on the next token
//! alone.
//!
//! Structural combinators ([`enter`], [`leave`], [`repeat`], [`maybe`]) pass
//! over whitespace-only text before the token they inspect, which makes
//! grammars indifferent to indentation between tags. [`text_action`] and
//! [`match_token`] take the very next token.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::error::{ParseError, ParseResult};
use crate::tokenizer::{Attribute, Tag, Token, TokenKind, TokenSource};

type ParseFn<S> = dyn Fn(&mut dyn TokenSource, &mut S) -> ParseResult;

/// A composable parser over a token stream, threading side-effect state `S`.
pub struct Parser<S>(Rc<ParseFn<S>>);

impl<S> Clone for Parser<S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<S: 'static> Parser<S> {
    /// Wrap a parsing function.
    #[must_use]
    pub fn new(f: impl Fn(&mut dyn TokenSource, &mut S) -> ParseResult + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Run the parser against `source`.
    ///
    /// # Errors
    ///
    /// Whatever [`ParseError`] the parser raises; the source is left wherever
    /// the failure occurred.
    pub fn parse(&self, source: &mut dyn TokenSource, state: &mut S) -> ParseResult {
        (self.0)(source, state)
    }
}

// =============================================================================
// Token helpers
// =============================================================================

/// Pull one token, mapping end of input to [`ParseError::PrematureEnd`].
///
/// # Errors
///
/// [`ParseError::PrematureEnd`] or [`ParseError::Io`].
pub fn next_token(source: &mut dyn TokenSource) -> ParseResult<Token> {
    Ok(source.next_token()?)
}

/// Pull the next token that is not whitespace-only text.
fn next_significant(source: &mut dyn TokenSource) -> ParseResult<Token> {
    loop {
        let token = next_token(source)?;
        if !token.is_blank_text() {
            return Ok(token);
        }
    }
}

/// Consume exactly one token of kind `kind`.
///
/// # Errors
///
/// [`ParseError::UnexpectedToken`] naming both kinds, or the source's own
/// terminal error.
pub fn expect(source: &mut dyn TokenSource, kind: TokenKind) -> ParseResult<Token> {
    let token = next_token(source)?;
    if token.kind() == kind {
        Ok(token)
    } else {
        Err(ParseError::UnexpectedToken {
            expected: kind,
            found: token.kind(),
        })
    }
}

/// Consume a start tag named `name`, skipping blank text before it.
fn start_tag(source: &mut dyn TokenSource, name: &str) -> ParseResult<Tag> {
    match next_significant(source)? {
        Token::StartTag(tag) if tag.name == name => Ok(tag),
        Token::StartTag(tag) => Err(ParseError::UnexpectedTag {
            expected: name.to_string(),
            found: tag.name,
        }),
        other => Err(ParseError::UnexpectedToken {
            expected: TokenKind::StartTag,
            found: other.kind(),
        }),
    }
}

/// Consume an end tag of any name, skipping blank text before it.
fn end_tag(source: &mut dyn TokenSource) -> ParseResult {
    match next_significant(source)? {
        Token::EndTag { .. } => Ok(()),
        other => Err(ParseError::UnexpectedToken {
            expected: TokenKind::EndTag,
            found: other.kind(),
        }),
    }
}

/// Trim `data` and collapse inner whitespace runs to single spaces.
#[must_use]
pub fn normalize_text(data: &str) -> String {
    data.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// Primitives
// =============================================================================

/// One token of kind `kind`.
#[must_use]
pub fn match_token<S: 'static>(kind: TokenKind) -> Parser<S> {
    Parser::new(move |source, _| expect(source, kind).map(drop))
}

/// A start tag named `tag`.
#[must_use]
pub fn enter<S: 'static>(tag: &str) -> Parser<S> {
    let name = tag.to_string();
    Parser::new(move |source, _| start_tag(source, &name).map(drop))
}

/// A start tag named `tag` that must carry attributes; `f` reads them.
///
/// A bare tag fails with [`ParseError::MissingAttributes`].
#[must_use]
pub fn enter_action<S: 'static>(
    tag: &str,
    f: impl Fn(&mut S, &Tag) -> ParseResult + 'static,
) -> Parser<S> {
    let name = tag.to_string();
    Parser::new(move |source, state| {
        let tag = start_tag(source, &name)?;
        if !tag.has_attributes() {
            return Err(ParseError::MissingAttributes { tag: tag.name });
        }
        f(state, &tag)
    })
}

/// A start tag named `tag` whose attributes are optional; `f` always runs and
/// may find the attribute list empty.
#[must_use]
pub fn enter_inspect<S: 'static>(
    tag: &str,
    f: impl Fn(&mut S, &Tag) -> ParseResult + 'static,
) -> Parser<S> {
    let name = tag.to_string();
    Parser::new(move |source, state| {
        let tag = start_tag(source, &name)?;
        f(state, &tag)
    })
}

/// Any end tag.
///
/// The name is not compared with the element being closed; nesting is
/// trusted to the document.
#[must_use]
pub fn leave<S: 'static>() -> Parser<S> {
    Parser::new(|source, _| end_tag(source))
}

/// One text token, content ignored.
#[must_use]
pub fn text<S: 'static>() -> Parser<S> {
    match_token(TokenKind::Text)
}

/// One text token. Its normalized content is handed to `f` unless empty.
#[must_use]
pub fn text_action<S: 'static>(f: impl Fn(&mut S, String) -> ParseResult + 'static) -> Parser<S> {
    Parser::new(move |source, state| match next_token(source)? {
        Token::Text { data } => {
            let text = normalize_text(&data);
            if text.is_empty() {
                return Ok(());
            }
            f(state, text)
        }
        other => Err(ParseError::UnexpectedToken {
            expected: TokenKind::Text,
            found: other.kind(),
        }),
    })
}

/// The rest of an element: optional text, then its end tag.
///
/// Normalized, non-empty text goes to `f`.
#[must_use]
pub fn content<S: 'static>(f: impl Fn(&mut S, String) -> ParseResult + 'static) -> Parser<S> {
    Parser::new(move |source, state| match next_token(source)? {
        Token::Text { data } => {
            let text = normalize_text(&data);
            if !text.is_empty() {
                f(state, text)?;
            }
            end_tag(source)
        }
        Token::EndTag { .. } => Ok(()),
        other => Err(ParseError::UnexpectedToken {
            expected: TokenKind::Text,
            found: other.kind(),
        }),
    })
}

/// Run `f` on the state without touching the input.
#[must_use]
pub fn action<S: 'static>(f: impl Fn(&mut S) -> ParseResult + 'static) -> Parser<S> {
    Parser::new(move |_, state| f(state))
}

// =============================================================================
// Composites
// =============================================================================

/// Each parser in order; the first failure stops the sequence.
#[must_use]
pub fn seq<S: 'static>(parsers: Vec<Parser<S>>) -> Parser<S> {
    Parser::new(move |source, state| {
        for parser in &parsers {
            parser.parse(source, state)?;
        }
        Ok(())
    })
}

/// Zero or more `tag` elements, ended by the container's end tag.
///
/// Each start tag `tag` is consumed and `body` runs; `body` must consume
/// through the element's own end tag. The terminating end tag is consumed.
#[must_use]
pub fn repeat<S: 'static>(tag: &str, body: Parser<S>) -> Parser<S> {
    let name = tag.to_string();
    Parser::new(move |source, state| repeat_items(source, state, &name, &body, false))
}

/// Like [`repeat`], but end of input in place of the terminating end tag also
/// ends the repetition.
///
/// End of input anywhere inside an element is still
/// [`ParseError::PrematureEnd`].
#[must_use]
pub fn repeat_to_end<S: 'static>(tag: &str, body: Parser<S>) -> Parser<S> {
    let name = tag.to_string();
    Parser::new(move |source, state| repeat_items(source, state, &name, &body, true))
}

fn repeat_items<S: 'static>(
    source: &mut dyn TokenSource,
    state: &mut S,
    name: &str,
    body: &Parser<S>,
    end_of_input_ends: bool,
) -> ParseResult {
    loop {
        match next_significant(source) {
            Ok(Token::StartTag(tag)) if tag.name == name => body.parse(source, state)?,
            Ok(Token::StartTag(tag)) => {
                return Err(ParseError::UnexpectedTag {
                    expected: name.to_string(),
                    found: tag.name,
                });
            }
            Ok(Token::EndTag { .. }) => return Ok(()),
            Ok(other) => {
                return Err(ParseError::UnexpectedToken {
                    expected: TokenKind::StartTag,
                    found: other.kind(),
                });
            }
            Err(ParseError::PrematureEnd) if end_of_input_ends => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

/// An optional `tag` element at the end of its parent.
///
/// Start tag `tag`: consumed, `body` runs, then one more end tag (the
/// parent's) is consumed. End tag: the construct is absent; the end tag is
/// consumed and nothing else happens.
#[must_use]
pub fn maybe<S: 'static>(tag: &str, body: Parser<S>) -> Parser<S> {
    let name = tag.to_string();
    Parser::new(move |source, state| match next_significant(source)? {
        Token::StartTag(tag) if tag.name == name => {
            body.parse(source, state)?;
            end_tag(source)
        }
        Token::StartTag(tag) => Err(ParseError::UnexpectedTag {
            expected: name.clone(),
            found: tag.name,
        }),
        Token::EndTag { .. } => Ok(()),
        other => Err(ParseError::UnexpectedToken {
            expected: TokenKind::StartTag,
            found: other.kind(),
        }),
    })
}

// =============================================================================
// Recursion
// =============================================================================

/// A named, late-bound grammar rule.
///
/// Create the rule first, build parsers that refer to it with [`rec`], then
/// [`define`](Self::define) it. The rule owns its parser; references made by
/// [`rec`] are weak, so a self-referential rule is not a reference cycle.
/// Keep the `Rule` alive as long as parsers referring to it are in use.
pub struct Rule<S>(Rc<RefCell<Option<Parser<S>>>>);

impl<S> Clone for Rule<S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<S> Default for Rule<S> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }
}

impl<S: 'static> Rule<S> {
    /// An undefined rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the rule to `parser`, replacing any earlier definition.
    pub fn define(&self, parser: Parser<S>) {
        *self.0.borrow_mut() = Some(parser);
    }

    /// True once [`define`](Self::define) has been called.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.0.borrow().is_some()
    }
}

/// Remaining stack below which [`rec`] switches to a fresh segment.
const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment [`rec`] allocates.
const STACK_SEGMENT: usize = 1024 * 1024;

/// A parser that runs whatever `rule` is defined as at parse time.
///
/// Recursion depth is limited by memory rather than by the thread's stack.
/// Fails with [`ParseError::UndefinedRule`] if the rule was never defined or
/// has been dropped.
#[must_use]
pub fn rec<S: 'static>(rule: &Rule<S>) -> Parser<S> {
    let slot: Weak<RefCell<Option<Parser<S>>>> = Rc::downgrade(&rule.0);
    Parser::new(move |source, state| {
        let Some(cell) = slot.upgrade() else {
            return Err(ParseError::UndefinedRule);
        };
        let parser = cell.borrow().clone().ok_or(ParseError::UndefinedRule)?;
        // Every nesting level of the input recurses through here.
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || parser.parse(source, state))
    })
}

// =============================================================================
// Attribute extraction
// =============================================================================

/// The first non-empty value bound to `key`.
///
/// # Errors
///
/// [`ParseError::MissingAttribute`] when no such value exists.
pub fn find_attribute<'a>(
    key: &str,
    attributes: impl IntoIterator<Item = &'a Attribute>,
) -> ParseResult<&'a str> {
    attributes
        .into_iter()
        .find(|attr| attr.name == key && !attr.value.is_empty())
        .map(|attr| attr.value.as_str())
        .ok_or_else(|| ParseError::MissingAttribute {
            name: key.to_string(),
        })
}

/// Parse a forum id from a link reference.
///
/// Either the whole value is a number, or its last `=`/`/` separated segment
/// is (`viewforum.php?f=42`, `/forum/42`).
///
/// # Errors
///
/// [`ParseError::InvalidId`] when neither holds a `u32`.
pub fn parse_id(value: &str) -> ParseResult<u32> {
    let value = value.trim();
    if let Ok(id) = value.parse() {
        return Ok(id);
    }
    value
        .rsplit(['=', '/'])
        .next()
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| ParseError::InvalidId {
            value: value.to_string(),
        })
}
