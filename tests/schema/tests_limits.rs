//! Expansion limits and concurrent instantiation.

use rstest::rstest;
use stencil::{
    MAX_INSTANTIATION_DEPTH, MAX_INSTANTIATION_NODES, ResolveError, ResolveOptions, SchemaError,
    SchemaParser, instantiate_all,
};

use crate::helpers::source_fixtures::*;

#[test]
fn test_self_referential_type_fails_closed() {
    let err = SchemaParser::default()
        .parse(SELF_REFERENTIAL)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap_err();

    assert_eq!(
        err,
        ResolveError::UnboundedRecursion {
            type_name: "Chain".to_string(),
            depth: MAX_INSTANTIATION_DEPTH,
        }
    );
    assert_eq!(err.code(), "E0401");
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(16)]
fn test_depth_limit_is_configurable(#[case] depth: usize) {
    let options = ResolveOptions::default().with_max_depth(depth);
    let err = SchemaParser::default()
        .parse(SELF_REFERENTIAL)
        .unwrap()
        .resolve(&options)
        .unwrap_err();
    assert!(matches!(err, ResolveError::UnboundedRecursion { depth: d, .. } if d == depth));
}

#[test]
fn test_node_budget() {
    let text = format!("{PAIR_DEF}\n[1000]Pair<str,int> many\n");
    let options = ResolveOptions::default().with_max_nodes(500);
    let err = SchemaParser::default()
        .parse(&text)
        .unwrap()
        .resolve(&options)
        .unwrap_err();
    assert_eq!(err, ResolveError::ExpansionLimit { limit: 500 });
}

#[rstest]
#[case("type Big = [300000]num\n", MAX_INSTANTIATION_NODES)]
#[case("type Huge = [4000000000]num\n", MAX_INSTANTIATION_NODES)]
#[case("type Endless = [99999999999999999999999]num\n", MAX_INSTANTIATION_NODES)]
fn test_array_alias_is_bounded_at_parse(#[case] text: &str, #[case] limit: usize) {
    let err = SchemaParser::default().parse(text).unwrap_err();
    assert_eq!(
        err,
        SchemaError::Definition(ResolveError::ExpansionLimit { limit })
    );
    assert_eq!(err.code(), "E0402");
}

#[test]
fn test_parser_options_bound_array_aliases() {
    let text = format!("{PAIR_DEF}\ntype Pairs = [10]Pair<str,num>\n");
    let parser = SchemaParser::default().with_options(ResolveOptions::default().with_max_nodes(29));
    assert!(matches!(
        parser.parse(&text),
        Err(SchemaError::Definition(ResolveError::ExpansionLimit { limit: 29 }))
    ));

    let parser = SchemaParser::default().with_options(ResolveOptions::default().with_max_nodes(30));
    let doc = parser.parse(&text).unwrap();
    assert_eq!(doc.types().get("Pairs").unwrap().items.len(), 10);
}

#[test]
fn test_instantiate_all_over_shared_registry() {
    let doc = SchemaParser::default()
        .parse(&format!("{PAIR_DEF}{COLOR_ENUM}{PAGE_DEF}"))
        .unwrap();
    let types = doc.types();

    let requests = (1..=32)
        .map(|n| format!("[{n}]Pair<str,num>"))
        .chain(["Page<Color>".to_string(), "Pair<str>".to_string()])
        .collect::<Vec<_>>();
    let results = instantiate_all(types, &requests, &ResolveOptions::default());

    assert_eq!(results.len(), requests.len());
    for (n, (request, result)) in results.iter().take(32).enumerate() {
        assert_eq!(request, &requests[n]);
        let (tree, root) = result.as_ref().unwrap();
        assert_eq!(tree[*root].items.len(), n + 1);
    }

    let (tree, page) = results[32].1.as_ref().unwrap();
    let data = tree.get_child(*page, "data").unwrap();
    assert_eq!(tree[data].items.len(), 2);
    assert!(results[33].1.is_err());
}
