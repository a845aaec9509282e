//! Streaming character input for the tokenizer.
//!
//! [§ 13.2.3 The input byte stream](https://html.spec.whatwg.org/multipage/parsing.html#the-input-byte-stream)
//!
//! Bytes are decoded as UTF-8 one character at a time straight off a
//! [`BufReader`]; only the few characters the tokenizer peeks at are ever
//! held in memory. Invalid sequences decode to U+FFFD and decoding resumes at
//! the next byte.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! "Before the tokenization stage, the input stream must be preprocessed by
//! normalizing newlines." CR LF pairs and lone CRs become a single LF.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Decoded, newline-normalized character stream with bounded lookahead.
pub(super) struct InputStream<R> {
    reader: BufReader<R>,
    lookahead: VecDeque<char>,
    /// The last decoded character was a CR, so an immediately following LF
    /// belongs to the same newline.
    skip_lf: bool,
    /// Number of characters consumed so far, for diagnostics.
    position: usize,
}

impl<R: Read> InputStream<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            lookahead: VecDeque::new(),
            skip_lf: false,
            position: 0,
        }
    }

    /// "Consume the next input character". Returns `None` at end of input.
    pub(super) fn next_char(&mut self) -> io::Result<Option<char>> {
        self.fill(1)?;
        let c = self.lookahead.pop_front();
        if c.is_some() {
            self.position += 1;
        }
        Ok(c)
    }

    /// Peek at the character `offset` positions past the next one without
    /// consuming anything.
    pub(super) fn peek(&mut self, offset: usize) -> io::Result<Option<char>> {
        self.fill(offset + 1)?;
        Ok(self.lookahead.get(offset).copied())
    }

    /// Drop the next `count` characters. Callers peek at them first.
    pub(super) fn skip(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            if self.next_char()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    pub(super) const fn position(&self) -> usize {
        self.position
    }

    /// Hand back the underlying reader, including bytes that were buffered
    /// but not yet decoded.
    pub(super) fn into_reader(self) -> BufReader<R> {
        self.reader
    }

    fn fill(&mut self, wanted: usize) -> io::Result<()> {
        while self.lookahead.len() < wanted {
            match self.decode_char()? {
                Some('\r') => {
                    self.lookahead.push_back('\n');
                    self.skip_lf = true;
                }
                Some('\n') if self.skip_lf => self.skip_lf = false,
                Some(c) => {
                    self.skip_lf = false;
                    self.lookahead.push_back(c);
                }
                None => break,
            }
        }
        Ok(())
    }

    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let len = utf8_seq_len(first);
        match len {
            0 => return Ok(Some(REPLACEMENT_CHARACTER)),
            1 => return Ok(Some(char::from(first))),
            _ => {}
        }

        let mut bytes = [first, 0, 0, 0];
        for slot in &mut bytes[1..len] {
            match self.peek_byte()? {
                Some(b) if b & 0xC0 == 0x80 => {
                    self.reader.consume(1);
                    *slot = b;
                }
                // Leave the offending byte for the next call.
                _ => return Ok(Some(REPLACEMENT_CHARACTER)),
            }
        }

        Ok(Some(
            std::str::from_utf8(&bytes[..len])
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(REPLACEMENT_CHARACTER),
        ))
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

const fn utf8_seq_len(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> String {
        let mut input = InputStream::new(bytes);
        let mut out = String::new();
        while let Some(c) = input.next_char().unwrap() {
            out.push(c);
        }
        out
    }

    #[test]
    fn test_decodes_multibyte() {
        assert_eq!(decode("Форум €".as_bytes()), "Форум €");
    }

    #[test]
    fn test_invalid_bytes_become_replacement() {
        assert_eq!(decode(b"a\xFFb"), "a\u{FFFD}b");
        // Truncated three-byte sequence followed by ASCII.
        assert_eq!(decode(b"\xE2\x82x"), "\u{FFFD}x");
    }

    #[test]
    fn test_newlines_normalized() {
        assert_eq!(decode(b"a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut input = InputStream::new("<!--".as_bytes());
        assert_eq!(input.peek(1).unwrap(), Some('!'));
        assert_eq!(input.peek(3).unwrap(), Some('-'));
        assert_eq!(input.peek(4).unwrap(), None);
        assert_eq!(input.next_char().unwrap(), Some('<'));
        assert_eq!(input.position(), 1);
    }
}
