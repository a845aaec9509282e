//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input lookahead ("If the next few characters are")
//! - Token emission ("Emit the current token")
//! - Building the tag, attribute and comment under construction

use std::io::{self, Read};

use forummap_common::warning::warn_once;

use super::machine::{HTMLTokenizer, TokenizerState};
use super::token::{Attribute, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<R: Read> HTMLTokenizer<R> {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<R: Read> HTMLTokenizer<R> {
    /// "If the next few characters are..."
    ///
    /// Looks at the characters after the current one without consuming them.
    pub(super) fn next_few_characters_are(
        &mut self,
        target: &str,
        ignore_ascii_case: bool,
    ) -> io::Result<bool> {
        for (i, target_char) in target.chars().enumerate() {
            let matches = match self.input.peek(i)? {
                Some(c) if ignore_ascii_case => c.eq_ignore_ascii_case(&target_char),
                Some(c) => c == target_char,
                None => false,
            };
            if !matches {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// ASCII whitespace as the tokenizer sees it.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        // "U+0009 CHARACTER TABULATION (tab)"
        // "U+000A LINE FEED (LF)"
        // "U+000C FORM FEED (FF)"
        // "U+0020 SPACE"
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl<R: Read> HTMLTokenizer<R> {
    /// Queue pending character data as a single text token.
    pub(super) fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let data = std::mem::take(&mut self.text);
            self.pending.push_back(Token::Text { data });
        }
    }

    /// "Emit the current token"
    pub(super) fn emit_current_token(&mut self) {
        let Some(token) = self.current_token.take() else {
            return;
        };
        self.flush_text();

        if let Token::StartTag(tag) = &token {
            self.last_start_tag_name = Some(tag.name.clone());

            // [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
            // [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
            // Without a tree builder to switch the tokenizer state, raw text
            // elements are detected here.
            match tag.name.as_str() {
                // "Switch the tokenizer to the RCDATA state."
                "title" | "textarea" => {
                    self.raw_text_state = TokenizerState::Rcdata;
                    self.switch_to(TokenizerState::Rcdata);
                }
                // "Switch the tokenizer to the RAWTEXT state."
                // Script data is treated the same way.
                "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                    self.raw_text_state = TokenizerState::Rawtext;
                    self.switch_to(TokenizerState::Rawtext);
                }
                _ => {}
            }
        }

        self.pending.push_back(token);
    }

    /// "Emit an end-of-file token."
    ///
    /// Flushes trailing character data; the source reports end of input once
    /// the queue is drained.
    pub(super) fn emit_eof_token(&mut self) {
        self.flush_text();
        self.current_token = None;
        self.finished = true;
    }

    /// "This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The unfinished tag is dropped.
    pub(super) fn eof_in_tag(&mut self) {
        self.log_parse_error("eof-in-tag");
        self.emit_eof_token();
    }

    /// "This is an eof-in-comment parse error. Emit the current comment token.
    /// Emit an end-of-file token."
    pub(super) fn eof_in_comment(&mut self) {
        self.log_parse_error("eof-in-comment");
        self.emit_current_token();
        self.emit_eof_token();
    }

    /// Resolve a character reference after `&` into the pending text.
    pub(super) fn flush_character_reference_into_text(&mut self) -> io::Result<()> {
        match self.consume_character_reference()? {
            Some(replacement) => self.text.push_str(&replacement),
            None => self.text.push('&'),
        }
        Ok(())
    }

    /// Resolve a character reference after `&` into the current attribute value.
    pub(super) fn flush_character_reference_into_attribute(&mut self) -> io::Result<()> {
        match self.consume_character_reference()? {
            Some(replacement) => {
                for c in replacement.chars() {
                    self.append_to_current_attribute_value(c);
                }
            }
            None => self.append_to_current_attribute_value('&'),
        }
        Ok(())
    }
}

// =============================================================================
// RCDATA/RAWTEXT Helpers
// =============================================================================

impl<R: Read> HTMLTokenizer<R> {
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "Anything else":
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer... Reconsume in the RCDATA state."
    pub(super) fn emit_raw_end_tag_name_anything_else(&mut self) {
        self.text.push_str("</");
        self.text.push_str(&self.temporary_buffer);
        self.current_token = None;
        self.reconsume_in(self.raw_text_state);
    }
}

// =============================================================================
// Token Construction Helpers
// =============================================================================

impl<R: Read> HTMLTokenizer<R> {
    /// "Append the lowercase version of the current input character to the
    /// current tag token's tag name."
    pub(super) fn append_to_tag_name(&mut self, c: char) {
        let c = c.to_ascii_lowercase();
        match self.current_token.as_mut() {
            Some(Token::StartTag(tag)) => tag.name.push(c),
            Some(Token::EndTag { name }) => name.push(c),
            _ => {}
        }
    }

    /// "Start a new attribute in the current tag token. Set that attribute's
    /// name and value to the empty string."
    ///
    /// Attributes on end tags are parsed and dropped.
    pub(super) fn start_new_attribute(&mut self) {
        if let Some(Token::StartTag(tag)) = self.current_token.as_mut() {
            tag.attributes.push(Attribute::new("", ""));
        }
    }

    /// "Append the lowercase version of the current input character to the
    /// current attribute's name."
    pub(super) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Some(Token::StartTag(tag)) = self.current_token.as_mut()
            && let Some(attr) = tag.attributes.last_mut()
        {
            attr.name.push(c.to_ascii_lowercase());
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub(super) fn append_to_current_attribute_value(&mut self, c: char) {
        if let Some(Token::StartTag(tag)) = self.current_token.as_mut()
            && let Some(attr) = tag.attributes.last_mut()
        {
            attr.value.push(c);
        }
    }

    /// "Append the current input character to the comment token's data."
    pub(super) fn append_to_comment(&mut self, c: char) {
        if let Some(Token::Comment { data }) = self.current_token.as_mut() {
            data.push(c);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl<R: Read> HTMLTokenizer<R> {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors are not fatal: the tokenizer recovers and continues. Each
    /// kind of error is reported once; every occurrence is logged at debug level.
    pub(super) fn log_parse_error(&self, kind: &str) {
        let pos = self.input.position();
        log::debug!(target: "forummap::tokenizer", "parse error {kind} at character {pos}");
        warn_once("tokenizer", &format!("parse error: {kind}"));
    }
}
