//! Integration tests for the HTML tokenizer.

use std::io::{self, Read};

use forummap_common::warning::was_warned;
use forummap_html::{Attribute, HTMLTokenizer, SourceError, Tag, Token, TokenSource};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input.as_bytes())
        .collect::<io::Result<Vec<_>>>()
        .unwrap()
}

fn start_tag(tag: Tag) -> Token {
    Token::StartTag(tag)
}

#[test]
fn test_plain_text_is_one_token() {
    assert_eq!(tokenize("Hello"), vec![Token::text("Hello")]);
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_doctype() {
    assert_eq!(
        tokenize("<!DOCTYPE html>"),
        vec![Token::Doctype {
            data: " html".to_string()
        }]
    );
    assert_eq!(tokenize("<!doctype html>").len(), 1);
}

#[test]
fn test_start_tag_lowercased() {
    let tokens = tokenize("<DIV Class=\"Menu\">");
    assert_eq!(
        tokens,
        vec![start_tag(Tag::new("div").with_attribute("class", "Menu"))]
    );
}

#[test]
fn test_end_tag() {
    assert_eq!(tokenize("</div>"), vec![Token::end_tag("div")]);
}

#[test]
fn test_end_tag_attributes_dropped() {
    assert_eq!(tokenize("</a class=\"x\">"), vec![Token::end_tag("a")]);
}

#[test]
fn test_self_closing_tag() {
    match &tokenize("<br/>")[0] {
        Token::StartTag(tag) => {
            assert_eq!(tag.name, "br");
            assert!(tag.self_closing);
            assert!(!tag.has_attributes());
        }
        other => panic!("Expected StartTag token, got {other}"),
    }
}

#[test]
fn test_attribute_quoting_styles() {
    let tokens = tokenize("<a href='1' title=x data-q=\"&quot;q&quot;\" hidden>");
    let Token::StartTag(tag) = &tokens[0] else {
        panic!("Expected StartTag token");
    };
    assert_eq!(
        tag.attributes,
        vec![
            Attribute::new("href", "1"),
            Attribute::new("title", "x"),
            Attribute::new("data-q", "\"q\""),
            Attribute::new("hidden", ""),
        ]
    );
}

#[test]
fn test_duplicate_attributes_kept_in_order() {
    let tokens = tokenize("<a href=\"\" href=\"2\">");
    let Token::StartTag(tag) = &tokens[0] else {
        panic!("Expected StartTag token");
    };
    let values: Vec<_> = tag.attributes().map(|a| a.value.as_str()).collect();
    assert_eq!(values, vec!["", "2"]);
}

#[test]
fn test_text_between_tags_is_coalesced() {
    assert_eq!(
        tokenize("<ul>\n  <li>a &amp; b</li>"),
        vec![
            start_tag(Tag::new("ul")),
            Token::text("\n  "),
            start_tag(Tag::new("li")),
            Token::text("a & b"),
            Token::end_tag("li"),
        ]
    );
}

#[test]
fn test_character_references() {
    assert_eq!(
        tokenize("&lt;&#65;&#x42;&copy;&amp &copy &unknown;"),
        vec![Token::text("<AB\u{00A9}& &copy &unknown;")]
    );
}

#[test]
fn test_comment() {
    assert_eq!(
        tokenize("<!-- hi -->x"),
        vec![
            Token::Comment {
                data: " hi ".to_string()
            },
            Token::text("x"),
        ]
    );
}

#[test]
fn test_bogus_comment() {
    assert_eq!(
        tokenize("<?xml version?>"),
        vec![Token::Comment {
            data: "?xml version?".to_string()
        }]
    );
}

#[test]
fn test_script_is_raw_text() {
    assert_eq!(
        tokenize("<script>if (a<b) { x = '</b>'; }</script><p>"),
        vec![
            start_tag(Tag::new("script")),
            Token::text("if (a<b) { x = '</b>'; }"),
            Token::end_tag("script"),
            start_tag(Tag::new("p")),
        ]
    );
}

#[test]
fn test_title_is_rcdata() {
    assert_eq!(
        tokenize("<title>A &amp; <b>B</b></title>"),
        vec![
            start_tag(Tag::new("title")),
            Token::text("A & <b>B</b>"),
            Token::end_tag("title"),
        ]
    );
}

#[test]
fn test_lone_less_than_is_text() {
    assert_eq!(tokenize("a < b"), vec![Token::text("a < b")]);
}

#[test]
fn test_newlines_normalized() {
    assert_eq!(tokenize("a\r\nb\rc"), vec![Token::text("a\nb\nc")]);
}

#[test]
fn test_eof_in_tag_drops_tag() {
    assert_eq!(tokenize("abc<div class="), vec![Token::text("abc")]);
    assert!(was_warned("tokenizer", "parse error: eof-in-tag"));
}

#[test]
fn test_end_of_input_is_sticky() {
    let mut tokenizer = HTMLTokenizer::new("<p>".as_bytes());
    assert_eq!(tokenizer.next_token().unwrap(), start_tag(Tag::new("p")));
    assert!(matches!(tokenizer.next_token(), Err(SourceError::EndOfInput)));
    assert!(matches!(tokenizer.next_token(), Err(SourceError::EndOfInput)));
}

#[test]
fn test_into_reader_returns_unread_input() {
    let mut tokenizer = HTMLTokenizer::new("<div id=x>rest of input".as_bytes());
    let _tag = tokenizer.next_token().unwrap();
    let mut rest = String::new();
    let _ = tokenizer.into_reader().read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "rest of input");
}

/// Yields its data once, then fails every read.
struct FailingReader {
    data: Option<&'static [u8]>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.take() {
            Some(data) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(n)
            }
            None => Err(io::Error::other("disk on fire")),
        }
    }
}

#[test]
fn test_read_error_is_reported_once() {
    let mut tokenizer = HTMLTokenizer::new(FailingReader {
        data: Some(b"<div>"),
    });
    assert_eq!(tokenizer.next_token().unwrap(), start_tag(Tag::new("div")));
    assert!(matches!(tokenizer.next_token(), Err(SourceError::Io(_))));
    assert!(matches!(tokenizer.next_token(), Err(SourceError::EndOfInput)));
}
