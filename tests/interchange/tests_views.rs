//! Serialized shape of resolved documents.

use serde_json::json;
use stencil::interchange::{InterchangeError, NodeView, PayloadView};
use stencil::{ResolveOptions, SchemaParser};

use crate::helpers::source_fixtures::*;

fn resolved(text: &str) -> stencil::Document {
    SchemaParser::default()
        .parse(text)
        .unwrap()
        .resolve(&ResolveOptions::default())
        .unwrap()
}

#[test]
fn test_user_api_payload() {
    let doc = resolved(USER_API);
    let payload = doc.to_json().unwrap();

    let user = json!({
        "name": "bob",
        "age": 18,
        "admin": false,
        "favourite": "#00FF00",
    });
    assert_eq!(
        payload,
        json!({
            "/users": { "body": { "total": 0, "data": [user.clone(), user.clone()] } },
            "/user": { "body": user, "note": null },
        })
    );
}

#[test]
fn test_annotated_view_keeps_types_and_hints() {
    let doc = resolved("num age: years = 18\nflags = [\n    bool on = true\n]\nstr missing\n");
    let annotated = doc.to_annotated_json().unwrap();

    assert_eq!(annotated["type"], "dict");
    let value = &annotated["value"];
    assert_eq!(value["age"], json!({ "type": "num", "hint": "years", "value": "18" }));
    assert_eq!(value["flags"]["type"], "list");
    assert_eq!(value["flags"]["value"][0]["value"], "true");
    // Required field without a value has no "value" key
    assert_eq!(value["missing"], json!({ "type": "str" }));
}

#[test]
fn test_unresolved_document_is_rejected() {
    let doc = SchemaParser::default().parse("num a = 1\n").unwrap();
    assert!(matches!(doc.to_json(), Err(InterchangeError::Unresolved)));
}

#[test]
fn test_payload_of_one_statement() {
    let doc = resolved(&format!("{PAIR_DEF}\n[2]Pair<num,bool> ps\n"));
    let ps = doc.get("ps").unwrap();
    assert_eq!(
        doc.payload_json(ps).unwrap(),
        json!([{ "left": null, "right": null }, { "left": null, "right": null }])
    );
}

#[test]
fn test_bare_list_items_keep_their_values() {
    let doc = resolved(MIXED_STATEMENTS);
    let payload = doc.to_json().unwrap();
    assert_eq!(payload["tags"], json!(["a", "b"]));

    let doc = resolved("nums = [\n    1\n    2\n]\n");
    assert_eq!(doc.to_json().unwrap(), json!({ "nums": [1, 2] }));
}

#[test]
fn test_views_are_format_agnostic() {
    let doc = resolved(MIXED_STATEMENTS);

    let yaml = serde_yaml::to_value(PayloadView::new(doc.tree(), doc.root())).unwrap();
    assert_eq!(yaml["title"].as_str(), Some("Schemas"));
    assert_eq!(yaml["count"].as_i64(), Some(3));
    assert_eq!(yaml["done"].as_bool(), Some(true));
    assert_eq!(yaml["summary"].as_str(), Some("multi\nline\ntext"));
    assert_eq!(yaml["tags"][1].as_str(), Some("b"));

    let text = serde_yaml::to_string(&NodeView::new(doc.tree(), doc.root())).unwrap();
    assert!(text.contains("type: dict"));
}
