//! Behavioural properties of parsing and instantiation.

use rstest::rstest;
use stencil::{
    Dispatcher, Node, Output, Registry, ResolveError, ResolveOptions, SchemaParser, Shape,
    instantiate,
};

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_assertions::*;

fn resolved(text: &str) -> stencil::Document {
    SchemaParser::default()
        .parse(text)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap()
}

#[rstest]
#[case("\"hi\"", "str")]
#[case("'single'", "str")]
#[case("42", "num")]
#[case("-3.5", "num")]
#[case("true", "bool")]
#[case("false", "bool")]
#[case("none", "any")]
#[case("hello world", "str")]
#[case("#FF0000", "str")]
fn test_untyped_literal_round_trips(#[case] value: &str, #[case] inferred: &str) {
    let node = Node::new("", "v", "", value);
    assert_eq!(node.kind_type, inferred);
    assert_eq!(node.output, Output::Literal(value.to_string()));
    assert_eq!(node.shape(), Shape::Scalar);
}

#[rstest]
#[case("[3]int", 3, "int")]
#[case("[]str", 1, "str")]
#[case("[0]num", 1, "num")]
#[case("[2][5]bool", 5, "bool")]
fn test_array_expansion_count(#[case] type_text: &str, #[case] len: usize, #[case] item: &str) {
    let (tree, root) = instantiate(&Registry::bootstrap(), type_text, &ResolveOptions::default()).unwrap();
    assert_items(&tree, root, len, item);
}

#[test]
fn test_generic_parameter_substitution() {
    let doc = resolved(&format!("{PAIR_DEF}\nPair<str,int> p\n"));
    let tree = doc.tree();
    let p = top_level(&doc, "p");

    assert_eq!(tree[p].output, Output::Children);
    assert_eq!(tree[child_path(tree, p, &["left"])].kind_type, "str");
    assert_eq!(tree[child_path(tree, p, &["right"])].kind_type, "int");
}

#[test]
fn test_enum_resolution() {
    let doc = resolved(&format!("{COLOR_ENUM}\nColor c = RED\nColor d = BLUE,constant\n"));
    let tree = doc.tree();
    assert_literal(tree, top_level(&doc, "c"), "#FF0000");
    assert_literal(tree, top_level(&doc, "d"), "#0000FF");
    assert!(tree[top_level(&doc, "d")].is_constant());
}

#[test]
fn test_projection_is_idempotent() {
    let doc = resolved(&format!("{PAIR_DEF}\n[2]Pair<num,num> ps\n"));
    let mut tree = doc.tree().clone();
    let ps = top_level(&doc, "ps");

    for id in tree.descendants(ps) {
        let before = tree[id].output.clone();
        tree.project(id);
        assert_eq!(tree[id].output, before);
    }
}

#[test]
fn test_parameter_mismatch_names_the_offender() {
    let err = SchemaParser::default()
        .parse(MISMATCHED_ARGS)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap_err();

    match err {
        ResolveError::ParameterCountMismatch {
            type_name,
            field,
            expected,
            found,
            span,
        } => {
            assert_eq!(type_name, "Pair");
            assert_eq!(field, "broken");
            assert_eq!((expected, found), (2, 1));
            assert!(span.is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_comment_lines_produce_nothing() {
    let doc = SchemaParser::default().parse(MIXED_STATEMENTS).unwrap();
    assert!(doc.get("hidden").is_none());
    assert!(doc.get("# num hidden").is_none());
    assert!(doc.get("count").is_some());
    assert!(doc.get("tags").is_some());
}

#[test]
fn test_child_name_collision_last_write_wins() {
    let doc = SchemaParser::default()
        .parse("num a = 1\nstr a = \"two\"\n")
        .unwrap();
    let a = top_level(&doc, "a");
    assert_eq!(doc.tree()[a].kind_type, "str");
    assert_eq!(doc.tree()[doc.root()].children.len(), 1);
}

#[test]
fn test_dispatcher_first_match_over_resolved_nodes() {
    #[derive(Debug, Default)]
    struct Counts {
        visited: usize,
        lists: usize,
        dicts: usize,
        others: usize,
    }

    let doc = resolved(&format!("{PAIR_DEF}\n[2]Pair<str,int> ps\nnum n = 1\n"));
    let tree = doc.tree();
    let nodes = tree
        .descendants(doc.root())
        .into_iter()
        .map(|id| tree[id].clone())
        .collect::<Vec<_>>();

    let mut dispatcher = Dispatcher::<Node, Counts>::default();
    dispatcher.register_pre_hook(|_, counts| counts.visited += 1);
    dispatcher.register_rule(|node, _| node.is_list(), |_, counts| counts.lists += 1);
    // Also true for lists; never reached for them
    dispatcher.register_rule(
        |node, _| node.is_list() || node.is_dict(),
        |_, counts| counts.dicts += 1,
    );
    dispatcher.register_rule(|_, _| true, |_, counts| counts.others += 1);
    dispatcher.run_all(&nodes);

    let counts = dispatcher.into_context();
    assert_eq!(counts.visited, nodes.len());
    assert_eq!(counts.lists, 1);
    // root + two Pair items
    assert_eq!(counts.dicts, 3);
    // four Pair members + n
    assert_eq!(counts.others, 5);
}
