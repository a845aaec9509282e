//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard as a pull tokenizer over any
//! [`std::io::Read`].

/// Character reference decoding per § 13.2.5.72.
pub mod character_reference;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Decoded character input with lookahead.
mod input;
/// HTML tokenizer state machine implementation.
pub mod machine;
/// The pull interface between tokenizer and parser.
pub mod source;
/// Token types produced by the tokenizer.
pub mod token;

pub use machine::{HTMLTokenizer, TokenizerState};
pub use source::{SourceError, TokenSource};
pub use token::{Attribute, Tag, Token, TokenKind};
