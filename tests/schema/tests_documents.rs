//! Whole-document parsing and resolution.

use stencil::{Output, ResolveOptions, SchemaParser};

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_assertions::*;

#[test]
fn test_user_api_definitions_and_blocks() {
    let doc = SchemaParser::default().parse(USER_API).unwrap();

    assert_eq!(doc.definitions(), ["User", "Color", "Page"]);
    assert_eq!(doc.apis().len(), 2);
    let get = doc.api("/users").unwrap();
    let post = doc.api("/user").unwrap();
    assert_eq!(doc.tree()[get].kind_type, "GET");
    assert_eq!(doc.tree()[post].kind_type, "POST");
    assert_eq!(doc.position(get).unwrap().line, 15);
}

#[test]
fn test_user_api_resolves_nested_generics() {
    let doc = SchemaParser::default()
        .parse(USER_API)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap();
    let tree = doc.tree();
    let get = doc.api("/users").unwrap();

    let body = child_path(tree, get, &["body"]);
    assert_eq!(tree[body].output, Output::Children);
    assert_literal(tree, child_path(tree, body, &["total"]), "0");

    let data = child_path(tree, body, &["data"]);
    assert_items(tree, data, 2, "User");
    for &user in &tree[data].items {
        assert_literal(tree, child_path(tree, user, &["name"]), "\"bob\"");
        assert_eq!(tree[child_path(tree, user, &["name"])].hint, "display name");
        assert_literal(tree, child_path(tree, user, &["favourite"]), "#00FF00");
    }
    assert_tree_shape(tree, doc.root());
}

#[test]
fn test_post_block_keeps_optional_marker() {
    let doc = SchemaParser::default()
        .parse(USER_API)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap();
    let tree = doc.tree();
    let post = doc.api("/user").unwrap();

    let note = child_path(tree, post, &["note"]);
    assert!(tree[note].is_optional());
    let age = child_path(tree, post, &["body", "age"]);
    assert_literal(tree, age, "18");
}

#[test]
fn test_inline_body_inside_generic_template() {
    let text = format!("{PAGE_DEF}{PAIR_DEF}\nPage<Pair<str,num>> page\n");
    let doc = SchemaParser::default()
        .parse(&text)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap();
    let tree = doc.tree();
    let page = top_level(&doc, "page");

    assert_items(tree, child_path(tree, page, &["data"]), 2, "Pair");
    assert_literal(tree, child_path(tree, page, &["meta", "cursor"]), "\"abc\"");
    let last = child_path(tree, page, &["meta", "last"]);
    assert_eq!(tree[last].kind_type, "Pair");
    assert_eq!(tree[child_path(tree, last, &["right"])].kind_type, "num");
}

#[test]
fn test_same_named_api_blocks_both_resolve() {
    let text = format!("{PAIR_DEF}\nGET /x = {{\n    Pair<str,str> a\n}}\nPOST /x = {{\n    Pair<num,num> b\n}}\n");
    let doc = SchemaParser::default()
        .parse(&text)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap();
    let tree = doc.tree();

    // The tree keeps the later block; the index keeps both
    assert_eq!(tree[top_level(&doc, "/x")].kind_type, "POST");
    let get = doc.apis()[0];
    let a = child_path(tree, get, &["a"]);
    assert_eq!(tree[a].output, Output::Children);
}

#[test]
fn test_multiline_value_in_mixed_document() {
    let doc = SchemaParser::default().parse(MIXED_STATEMENTS).unwrap();
    let tree = doc.tree();
    assert_literal(tree, top_level(&doc, "summary"), "\"multi\nline\ntext\"");
    assert_literal(tree, top_level(&doc, "done"), "true");
    let tags = top_level(&doc, "tags");
    assert_items(tree, tags, 2, "str");
    assert_literal(tree, tree[tags].items[0], "\"a\"");
    assert_literal(tree, tree[tags].items[1], "\"b\"");
}

#[test]
fn test_bare_list_items_are_values() {
    let text = "nums = [\n    1\n    2.5\n]\nflags = [\n    true\n    none\n]\n";
    let doc = SchemaParser::default()
        .parse(text)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap();
    let tree = doc.tree();

    let nums = top_level(&doc, "nums");
    assert_items(tree, nums, 2, "num");
    assert_literal(tree, tree[nums].items[1], "2.5");

    let flags = top_level(&doc, "flags");
    assert_eq!(tree[tree[flags].items[0]].kind_type, "bool");
    assert_literal(tree, tree[flags].items[1], "none");
}
