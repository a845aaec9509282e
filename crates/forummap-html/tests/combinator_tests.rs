//! Integration tests for the token-level parser combinators.

use forummap_html::parser::combinator::{
    action, content, enter, enter_action, leave, match_token, maybe, rec, repeat, repeat_to_end,
    seq, text, text_action,
};
use forummap_html::parser::{Parser, Rule};
use forummap_html::{HTMLTokenizer, ParseError, ParseResult, Tag, TokenKind, TokenSource};

/// Run `parser` over `input`, returning the result and whatever is left of the
/// input as tokens.
fn run<S: 'static>(parser: &Parser<S>, input: &str, state: &mut S) -> (ParseResult, usize) {
    let mut source = HTMLTokenizer::new(input.as_bytes());
    let result = parser.parse(&mut source, state);
    let mut left = 0;
    while source.next_token().is_ok() {
        left += 1;
    }
    (result, left)
}

fn push(label: &'static str) -> Parser<Vec<String>> {
    action(move |log: &mut Vec<String>| {
        log.push(label.to_string());
        Ok(())
    })
}

fn count() -> Parser<usize> {
    action(|n: &mut usize| {
        *n += 1;
        Ok(())
    })
}

#[test]
fn test_match_token_kind_mismatch() {
    let (result, _) = run(&match_token(TokenKind::Text), "<p>", &mut ());
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedToken {
            expected: TokenKind::Text,
            found: TokenKind::StartTag,
        })
    ));
}

#[test]
fn test_match_token_at_end_of_input() {
    let (result, _) = run(&match_token(TokenKind::StartTag), "", &mut ());
    assert!(matches!(result, Err(ParseError::PrematureEnd)));
}

#[test]
fn test_enter_skips_blank_text() {
    let (result, left) = run(&enter("ul"), "\n   <ul>x", &mut ());
    result.unwrap();
    assert_eq!(left, 1);
}

#[test]
fn test_enter_wrong_tag() {
    let (result, _) = run(&enter("ul"), "<ol>", &mut ());
    match result {
        Err(ParseError::UnexpectedTag { expected, found }) => {
            assert_eq!(expected, "ul");
            assert_eq!(found, "ol");
        }
        other => panic!("Expected UnexpectedTag, got {other:?}"),
    }
}

#[test]
fn test_enter_rejects_text() {
    let (result, _) = run(&enter("ul"), "menu<ul>", &mut ());
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedToken {
            expected: TokenKind::StartTag,
            found: TokenKind::Text,
        })
    ));
}

#[test]
fn test_leave_accepts_any_end_tag() {
    let (result, _) = run(&leave(), " </whatever>", &mut ());
    result.unwrap();

    let (result, _) = run(&leave(), "<p>", &mut ());
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedToken {
            expected: TokenKind::EndTag,
            ..
        })
    ));
}

#[test]
fn test_enter_action_reads_attributes() {
    let parser = enter_action("a", |ids: &mut Vec<String>, tag: &Tag| {
        ids.extend(tag.attributes().map(|a| a.value.clone()));
        Ok(())
    });
    let mut ids = Vec::new();
    let (result, _) = run(&parser, "<a href=\"7\" class=\"x\">", &mut ids);
    result.unwrap();
    assert_eq!(ids, vec!["7", "x"]);
}

#[test]
fn test_enter_action_requires_attributes() {
    let parser = enter_action("a", |_: &mut (), _: &Tag| Ok(()));
    let (result, _) = run(&parser, "<a>", &mut ());
    assert!(matches!(result, Err(ParseError::MissingAttributes { tag }) if tag == "a"));
}

#[test]
fn test_text_action_normalizes() {
    let parser = text_action(|log: &mut Vec<String>, text| {
        log.push(text);
        Ok(())
    });
    let mut log = Vec::new();
    let (result, _) = run(&parser, "  Role\n\tplaying   games ", &mut log);
    result.unwrap();
    assert_eq!(log, vec!["Role playing games"]);
}

#[test]
fn test_text_action_ignores_blank_text() {
    let parser = text_action(|_: &mut (), _| Err(ParseError::MissingTitle));
    let (result, left) = run(&parser, " \n <b>", &mut ());
    result.unwrap();
    assert_eq!(left, 1);
}

#[test]
fn test_text_action_propagates_action_error() {
    let parser = text_action(|_: &mut (), _| Err(ParseError::MissingTitle));
    let (result, _) = run(&parser, "title", &mut ());
    assert!(matches!(result, Err(ParseError::MissingTitle)));
}

#[test]
fn test_text_takes_one_text_token() {
    let parser = seq(vec![text(), count()]);
    let mut n = 0;
    let (result, left) = run(&parser, "Games<b>", &mut n);
    result.unwrap();
    assert_eq!(n, 1);
    assert_eq!(left, 1);

    let (result, _) = run(&text::<()>(), "<b>", &mut ());
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedToken { expected: TokenKind::Text, found: TokenKind::StartTag })
    ));
}

#[test]
fn test_content_with_and_without_text() {
    let parser = content(|log: &mut Vec<String>, text| {
        log.push(text);
        Ok(())
    });
    let mut log = Vec::new();
    let (result, left) = run(&parser, "</span>", &mut log);
    result.unwrap();
    assert_eq!(left, 0);
    assert!(log.is_empty());

    let (result, left) = run(&parser, " Hardware </span>", &mut log);
    result.unwrap();
    assert_eq!(left, 0);
    assert_eq!(log, vec!["Hardware"]);
}

#[test]
fn test_seq_stops_at_first_failure() {
    let parser = seq(vec![push("a"), match_token(TokenKind::Comment), push("b")]);
    let mut log = Vec::new();
    let (result, _) = run(&parser, "<p>", &mut log);
    assert!(result.is_err());
    assert_eq!(log, vec!["a"]);
}

#[test]
fn test_repeat_zero_items() {
    let mut n = 0;
    let (result, left) = run(&repeat("li", count()), "</ul>", &mut n);
    result.unwrap();
    assert_eq!(n, 0);
    assert_eq!(left, 0);
}

#[test]
fn test_repeat_consumes_container_end() {
    let body = seq(vec![count(), leave()]);
    let mut n = 0;
    let (result, left) = run(
        &repeat("li", body),
        "<li></li>\n<li></li></ul><p>",
        &mut n,
    );
    result.unwrap();
    assert_eq!(n, 2);
    assert_eq!(left, 1);
}

#[test]
fn test_repeat_wrong_tag() {
    let body = seq(vec![count(), leave()]);
    let (result, _) = run(&repeat("li", body), "<li></li><p>", &mut 0);
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedTag { expected, found }) if expected == "li" && found == "p"
    ));
}

#[test]
fn test_repeat_premature_end() {
    let body = seq(vec![count(), leave()]);
    let (result, _) = run(&repeat("li", body), "<li></li><li>", &mut 0);
    assert!(matches!(result, Err(ParseError::PrematureEnd)));
}

#[test]
fn test_repeat_to_end_accepts_end_of_input_between_items() {
    let body = seq(vec![count(), leave()]);
    let mut n = 0;
    let (result, _) = run(&repeat_to_end("li", body), "<li></li>\n<li></li>\n", &mut n);
    result.unwrap();
    assert_eq!(n, 2);
}

#[test]
fn test_repeat_to_end_rejects_end_of_input_inside_item() {
    let body = seq(vec![count(), enter("span"), leave(), leave()]);
    let (result, _) = run(&repeat_to_end("li", body), "<li><span>", &mut 0);
    assert!(matches!(result, Err(ParseError::PrematureEnd)));
}

#[test]
fn test_maybe_absent() {
    let mut n = 0;
    let (result, left) = run(&maybe("ul", count()), "</li></ul>", &mut n);
    result.unwrap();
    assert_eq!(n, 0);
    assert_eq!(left, 1);
}

#[test]
fn test_maybe_present_consumes_parent_end() {
    let body = repeat("li", seq(vec![count(), leave()]));
    let mut n = 0;
    let (result, left) = run(&maybe("ul", body), "<ul><li></li></ul></li>", &mut n);
    result.unwrap();
    assert_eq!(n, 1);
    assert_eq!(left, 0);
}

#[test]
fn test_maybe_rejects_other_tag() {
    let (result, _) = run(&maybe("ul", count()), "<ol>", &mut 0);
    assert!(matches!(result, Err(ParseError::UnexpectedTag { .. })));
}

#[test]
fn test_rec_nests_without_limit() {
    let rule = Rule::new();
    rule.define(maybe("ul", repeat("li", seq(vec![count(), rec(&rule)]))));
    let list = rec(&rule);

    let depth = 50;
    let input = format!(
        "{}{}</div>",
        "<ul><li>".repeat(depth),
        "</li></ul>".repeat(depth)
    );
    let mut n = 0;
    let (result, left) = run(&list, &input, &mut n);
    result.unwrap();
    assert_eq!(n, depth);
    assert_eq!(left, 0);
    assert!(rule.is_defined());
}

#[test]
fn test_rec_after_rule_dropped() {
    let parser = {
        let rule: Rule<()> = Rule::new();
        rule.define(leave());
        rec(&rule)
    };
    let (result, _) = run(&parser, "</p>", &mut ());
    assert!(matches!(result, Err(ParseError::UndefinedRule)));
}
