//! Tests for the forum tree: traversal and rendering.

use forummap_tree::render::{markup_to_string, text_to_string};
use forummap_tree::{ForumId, ForumTree};

/// Helper to build the tree used by most tests:
///
/// ```text
/// Games
///     [42]: RPGs
///         [43]: JRPGs
///     [44]: Strategy
/// Hardware
/// ```
fn sample_tree() -> ForumTree {
    let mut tree = ForumTree::new();
    let games = tree.append_child(ForumId::ROOT, 0, "Games");
    let rpgs = tree.append_child(games, 42, "RPGs");
    let _jrpgs = tree.append_child(rpgs, 43, "JRPGs");
    let _strategy = tree.append_child(games, 44, "Strategy");
    let _hardware = tree.append_child(ForumId::ROOT, 0, "Hardware");
    tree
}

#[test]
fn test_len_excludes_root() {
    let tree = sample_tree();
    assert_eq!(tree.len(), 5);
    assert!(!tree.is_empty());
    assert!(ForumTree::new().is_empty());
}

#[test]
fn test_walk_is_preorder_with_depth() {
    let tree = sample_tree();
    let visited: Vec<(usize, u32, &str)> = tree
        .walk()
        .map(|entry| (entry.depth, entry.id, entry.title))
        .collect();
    assert_eq!(
        visited,
        vec![
            (0, 0, "Games"),
            (1, 42, "RPGs"),
            (2, 43, "JRPGs"),
            (1, 44, "Strategy"),
            (0, 0, "Hardware"),
        ]
    );
}

#[test]
fn test_parent_links() {
    let tree = sample_tree();
    let games = tree.categories()[0];
    let rpgs = tree.children(games)[0];
    let jrpgs = tree.children(rpgs)[0];

    assert_eq!(tree.parent(games), Some(ForumId::ROOT));
    assert_eq!(tree.parent(ForumId::ROOT), None);
    assert_eq!(tree.parent(jrpgs), Some(rpgs));
    assert_eq!(tree.parent(rpgs), Some(games));
}

#[test]
fn test_render_text() {
    let tree = sample_tree();
    assert_eq!(
        text_to_string(&tree),
        "Games\n\t[42]: RPGs\n\t\t[43]: JRPGs\n\t[44]: Strategy\nHardware\n"
    );
}

#[test]
fn test_render_markup() {
    let mut tree = ForumTree::new();
    let games = tree.append_child(ForumId::ROOT, 0, "Games");
    let _rpgs = tree.append_child(games, 42, "RPGs & more");

    assert_eq!(
        markup_to_string(&tree, "f-map"),
        concat!(
            r#"<div id="f-map"><ul><li><span><span title="Games"></span></span>"#,
            r#"<ul><li><span><a href="42">RPGs &amp; more</a></span></li></ul>"#,
            "</li></ul></div>"
        )
    );
}

#[test]
fn test_render_markup_closes_every_level() {
    assert_eq!(
        markup_to_string(&sample_tree(), "f-map"),
        concat!(
            r#"<div id="f-map"><ul><li><span><span title="Games"></span></span><ul>"#,
            r#"<li><span><a href="42">RPGs</a></span>"#,
            r#"<ul><li><span><a href="43">JRPGs</a></span></li></ul></li>"#,
            r#"<li><span><a href="44">Strategy</a></span></li>"#,
            "</ul></li></ul>",
            r#"<ul><li><span><span title="Hardware"></span></span></li></ul></div>"#
        )
    );
}

#[test]
fn test_render_deep_chain() {
    let depth: usize = 50_000;
    let mut tree = ForumTree::new();
    let mut parent = tree.append_child(ForumId::ROOT, 0, "Root");
    for i in 1..=depth {
        parent = tree.append_child(parent, u32::try_from(i).unwrap(), format!("L{i}"));
    }

    let markup = markup_to_string(&tree, "f-map");
    assert_eq!(markup.matches("<ul>").count(), depth + 1);
    assert!(markup.ends_with(&format!("{}</li></ul></div>", "</li></ul>".repeat(depth))));
    let text = text_to_string(&tree);
    assert_eq!(text.lines().count(), depth + 1);
}

#[test]
fn test_nested_json() {
    let tree = sample_tree();
    let json = serde_json::to_value(tree.to_nested()).unwrap();
    assert_eq!(json[0]["title"], "Games");
    assert_eq!(json[0]["children"][0]["id"], 42);
    assert_eq!(json[0]["children"][0]["children"][0]["title"], "JRPGs");
    assert_eq!(json[1]["children"].as_array().map(Vec::len), Some(0));
}
