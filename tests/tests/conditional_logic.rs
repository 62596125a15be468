use pretty_assertions::assert_eq;
use quire::logic::{FieldPath, Reference};
use quire::{Condition, ConditionalLogicResolver, Operation, Pipeline, ResolvedPathMap};
use serde_json::json;
use tests::{assert_accepted, assert_rejected, fixtures};

#[test]
fn repeater_entries_carry_rewritten_conditions() {
    tests::init_logging();

    let fields = fixtures::fields(json!([
        {
            "name": "foo",
            "model": "repeater",
            "conditionalLogic": {"mode": "list"},
            "fields": [
                {"name": "bar", "model": "text", "conditionalLogic": {"../foo": {"!=": null}}}
            ]
        },
        {"name": "mode", "model": "text"}
    ]));

    let map = ResolvedPathMap::resolve(&fields, &json!({"foo": [{}, {}]}));

    assert_eq!(
        map.paths().collect::<Vec<_>>(),
        ["foo", "foo.0.bar", "foo.1.bar", "mode"]
    );

    let rewritten = Condition::Field {
        reference: Reference::Absolute(FieldPath::parse("foo")),
        predicate: quire::logic::Predicate::Ne(serde_json::Value::Null),
    };
    assert_eq!(map.get("foo.0.bar"), Some(Some(&rewritten)));
    assert_eq!(map.get("foo.1.bar"), Some(Some(&rewritten)));
    assert_eq!(
        map.get("foo"),
        Some(Some(&Condition::Field {
            reference: Reference::Absolute(FieldPath::parse("mode")),
            predicate: quire::logic::Predicate::Eq(json!("list")),
        }))
    );
    assert_eq!(map.get("mode"), Some(None));
}

#[test]
fn inactive_fields_are_not_required() {
    tests::init_logging();
    let fields = fixtures::product();

    let record = assert_accepted!(Pipeline::new(&fields, Operation::Create).run(json!({
        "name": "Lamp",
        "forSale": false
    })));

    assert_eq!(record["price"], json!(0));
}

#[test]
fn activity_follows_sanitized_values() {
    tests::init_logging();
    let fields = fixtures::product();

    // "y" is coerced to `true` before conditions are evaluated.
    let errors = assert_rejected!(Pipeline::new(&fields, Operation::Create).run(json!({
        "name": "Lamp",
        "forSale": "y"
    })));

    assert_eq!(errors.get("price"), Some("This field is required"));
}

#[test]
fn relative_references_reach_the_enclosing_record() {
    tests::init_logging();
    let fields = fixtures::page();

    let errors = assert_rejected!(Pipeline::new(&fields, Operation::Create).run(json!({
        "featured": true,
        "blocks": [{"title": "A", "caption": "a"}, {"title": "B"}]
    })));
    assert_eq!(
        errors.iter().collect::<Vec<_>>(),
        [("blocks.1.caption", "This field is required")]
    );

    assert_accepted!(Pipeline::new(&fields, Operation::Create).run(json!({
        "featured": false,
        "blocks": [{"title": "A"}, {"title": "B"}]
    })));
}

#[test]
fn references_escaping_the_root_are_inactive() {
    tests::init_logging();

    let fields = fixtures::fields(json!([
        {
            "name": "title",
            "model": "text",
            "required": true,
            "conditionalLogic": {"$not": {"../../missing": 1}}
        }
    ]));

    let record = json!({});
    let map = ResolvedPathMap::resolve(&fields, &record);
    let resolver = ConditionalLogicResolver::new(&map, &record);
    assert!(!resolver.is_active("title"));

    assert_accepted!(Pipeline::new(&fields, Operation::Create).run(record));
}

#[test]
fn operators() {
    let record = json!({"n": 5, "s": "draft-2", "list": "b"});

    let cases = [
        (json!({"n": {">": 4, "<": 6}}), true),
        (json!({"n": {">=": 5, "<=": 5}}), true),
        (json!({"n": {"!=": 5}}), false),
        (json!({"n": 5.0}), true),
        (json!({"s": {"regexp": "^draft-\\d+$"}}), true),
        (json!({"list": {"in": ["a", "c"]}}), false),
        (json!({"$or": [{"n": 1}, {"list": "b"}]}), true),
        (json!({"missing": null}), true),
        (json!({"missing": {">": 0}}), false),
    ];

    for (src, expected) in cases {
        let condition = Condition::from_json(&src).unwrap();
        assert_eq!(condition.evaluate(&record), expected, "{src}");
    }
}

#[test]
fn malformed_conditions_fail_schema_loading() {
    let err = quire::ModelRegistry::new()
        .build_from_json(
            &json!([
                {"name": "a", "model": "text", "conditionalLogic": {"b": {"regexp": "("}}}
            ])
            .to_string(),
        )
        .unwrap_err();

    assert!(err.is_invalid_schema());
    assert!(err
        .to_string()
        .starts_with("invalid schema: field `a` has invalid conditional logic"));
}
