//! HTML tokenizer and forum map parser for forummap.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Pull-based: one token per call, straight off any [`std::io::Read`]
//!   - Data, RCDATA, RAWTEXT, tag, attribute, comment and DOCTYPE states
//!   - Numeric and common named character references
//!
//! - **Parser combinators** over the token stream
//!   - `enter`, `leave`, `repeat`, `maybe`, `seq`, text and attribute extractors
//!   - Late-bound rules for recursive grammars
//!
//! - **Forum map grammar** building a [`forummap_tree::ForumTree`]
//!
//! # Not Implemented
//!
//! - Tree construction (implicit tag closing, error recovery)
//! - Script data escape states
//! - Encodings other than UTF-8
//! - The full named character reference table

/// Forum map parsing.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{Anchor, ForumGrammar, ParseError, ParseResult, parse_forums, seek_anchor};
pub use tokenizer::{Attribute, HTMLTokenizer, SourceError, Tag, Token, TokenKind, TokenSource};
