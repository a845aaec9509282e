//! The token source consumed by the parser combinators.

use std::io;

use thiserror::Error;

use super::token::Token;

/// Why a [`TokenSource`] could not produce another token.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The input is exhausted. Every later call reports this again.
    #[error("end of input")]
    EndOfInput,

    /// The underlying reader failed.
    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// A pull-based stream of tokens.
///
/// Tokens are handed out one at a time and never revisited, so a source
/// never needs more than the current token in memory.
pub trait TokenSource {
    /// Produce the next token.
    ///
    /// # Errors
    ///
    /// [`SourceError::EndOfInput`] once the input is exhausted, or
    /// [`SourceError::Io`] when reading fails.
    fn next_token(&mut self) -> Result<Token, SourceError>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Result<Token, SourceError> {
        (**self).next_token()
    }
}

/// Pre-built token lists, mostly useful in tests.
impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Token, SourceError> {
        self.next().ok_or(SourceError::EndOfInput)
    }
}
