//! Character reference decoding for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The tokenizer calls [`HTMLTokenizer::consume_character_reference`] right
//! after consuming a `&`. The reference is recognized by peeking ahead, so
//! when nothing matches the `&` simply stays literal text.
//!
//! The full standard defines 2,231 named references; index pages only use a
//! handful, and those are in [`NAMED_ENTITIES`].

use std::collections::HashMap;
use std::io::{self, Read};
use std::sync::LazyLock;

use super::machine::HTMLTokenizer;

/// Longest entity name in the table, plus the semicolon.
const MAX_NAME_LEN: usize = 8;

/// Maps entity names (without `&` and `;`) to their replacement text.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{00A0}"),
        ("copy", "\u{00A9}"),
        ("reg", "\u{00AE}"),
        ("trade", "\u{2122}"),
        ("mdash", "\u{2014}"),
        ("ndash", "\u{2013}"),
        ("hellip", "\u{2026}"),
        ("bull", "\u{2022}"),
        ("middot", "\u{00B7}"),
        ("lsquo", "\u{2018}"),
        ("rsquo", "\u{2019}"),
        ("ldquo", "\u{201C}"),
        ("rdquo", "\u{201D}"),
        ("laquo", "\u{00AB}"),
        ("raquo", "\u{00BB}"),
        ("times", "\u{00D7}"),
        ("deg", "\u{00B0}"),
        ("euro", "\u{20AC}"),
        ("pound", "\u{00A3}"),
    ])
});

/// Legacy references that are recognized without a trailing semicolon.
const LEGACY_ENTITIES: [&str; 4] = ["amp", "lt", "gt", "quot"];

/// Look up a named character reference (without `&` and `;`).
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is 0x00 ... or greater than 0x10FFFF ... or a surrogate,
/// set the character reference code to 0xFFFD."
fn numeric_reference(code: u32) -> char {
    match code {
        0 => '\u{FFFD}',
        code => char::from_u32(code).unwrap_or('\u{FFFD}'),
    }
}

impl<R: Read> HTMLTokenizer<R> {
    /// Try to consume a character reference following an already consumed
    /// `&`. Returns the replacement text, or `None` (consuming nothing) when
    /// the input does not start a recognizable reference.
    pub(super) fn consume_character_reference(&mut self) -> io::Result<Option<String>> {
        match self.input.peek(0)? {
            // "U+0023 NUMBER SIGN (#)"
            Some('#') => self.consume_numeric_reference(),
            // "ASCII alphanumeric"
            Some(c) if c.is_ascii_alphanumeric() => self.consume_named_reference(),
            // "Anything else": flush the '&' as-is.
            _ => Ok(None),
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    fn consume_named_reference(&mut self) -> io::Result<Option<String>> {
        let mut name = String::new();
        for offset in 0..MAX_NAME_LEN {
            match self.input.peek(offset)? {
                Some(c) if c.is_ascii_alphanumeric() => name.push(c),
                Some(';') => {
                    return match lookup_entity(&name) {
                        Some(replacement) => {
                            self.input.skip(offset + 1)?;
                            Ok(Some(replacement.to_string()))
                        }
                        None => Ok(None),
                    };
                }
                _ => break,
            }
        }

        // Legacy names also match without the semicolon.
        if LEGACY_ENTITIES.contains(&name.as_str()) {
            self.log_parse_error("missing-semicolon-after-character-reference");
            self.input.skip(name.len())?;
            return Ok(lookup_entity(&name).map(str::to_string));
        }
        Ok(None)
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    fn consume_numeric_reference(&mut self) -> io::Result<Option<String>> {
        let (radix, digits_start) = match self.input.peek(1)? {
            Some('x' | 'X') => (16, 2),
            _ => (10, 1),
        };

        let mut code: u32 = 0;
        let mut offset = digits_start;
        while let Some(digit) = self.input.peek(offset)?.and_then(|c| c.to_digit(radix)) {
            code = code.saturating_mul(radix).saturating_add(digit);
            offset += 1;
        }

        if offset == digits_start {
            // "absence-of-digits-in-numeric-character-reference parse error"
            self.log_parse_error("absence-of-digits-in-numeric-character-reference");
            return Ok(None);
        }

        if self.input.peek(offset)? == Some(';') {
            offset += 1;
        } else {
            self.log_parse_error("missing-semicolon-after-character-reference");
        }
        self.input.skip(offset)?;
        Ok(Some(numeric_reference(code).to_string()))
    }
}
