use pretty_assertions::assert_eq;
use quire::schema::Message;
use quire::{FieldDef, ModelRegistry, Operation, Pipeline};
use serde_json::{json, Value};
use std::sync::Arc;
use tests::{assert_accepted, assert_err, assert_ok, assert_rejected};

fn build(defs: serde_json::Value) -> quire::Result<quire::Fields> {
    ModelRegistry::new().build_from_json(&defs.to_string())
}

#[test]
fn builds_nested_fields() {
    let fields = assert_ok!(build(json!([
        {"name": "title", "model": "text", "required": true, "options": {"maxLength": 80}},
        {
            "name": "sections",
            "model": "repeater",
            "fields": [
                {"name": "heading", "model": "text"},
                {"name": "items", "model": "repeater", "fields": [{"name": "n", "model": "number"}]}
            ]
        }
    ])));

    assert_eq!(fields.names().collect::<Vec<_>>(), ["title", "sections"]);

    let title = fields.get("title").unwrap();
    assert!(title.required);
    assert_eq!(title.options.usize("maxLength"), Some(80));
    assert_eq!(title.options.bool("trim"), Some(true));

    let sections = fields.get("sections").unwrap().subfields.as_ref().unwrap();
    assert!(sections.get("items").unwrap().is_repeater());
}

#[test]
fn rejects_unknown_models() {
    let err = assert_err!(build(json!([{"name": "c", "model": "color"}])));
    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: field `c` uses unknown model `color`"
    );
}

#[test]
fn rejects_unknown_options() {
    let err = assert_err!(build(json!([
        {"name": "n", "model": "number", "options": {"maxLength": 3}}
    ])));
    assert_eq!(
        err.to_string(),
        "invalid schema: field `n` sets option `maxLength`, which model `number` does not declare"
    );
}

#[test]
fn rejects_repeaters_without_subfields() {
    let err = assert_err!(build(json!([{"name": "r", "model": "repeater"}])));
    assert_eq!(
        err.to_string(),
        "invalid schema: repeater field `r` declares no sub-fields"
    );
}

#[test]
fn rejects_null_defaults_on_non_nullable_fields() {
    let err = assert_err!(build(json!([
        {"name": "t", "model": "text", "default": null}
    ])));
    assert!(err.is_invalid_schema());

    assert_ok!(build(json!([
        {"name": "t", "model": "text", "nullable": true, "default": null}
    ])));
}

#[test]
fn rejects_duplicate_names() {
    let err = assert_err!(build(json!([
        {"name": "a", "model": "text"},
        {"name": "a", "model": "number"}
    ])));
    assert_eq!(err.to_string(), "invalid schema: duplicate field `a`");
}

#[test]
fn rejects_malformed_definitions() {
    let err = assert_err!(build(json!([{"name": "a", "model": "text", "colour": 1}])));
    assert!(err.is_invalid_schema());
    assert!(err
        .to_string()
        .starts_with("invalid schema: malformed field definitions: unknown field `colour`"));
}

#[test]
fn definitions_round_trip_through_serde() {
    let src = json!({
        "name": "price",
        "model": "number",
        "required": true,
        "conditionalLogic": {"forSale": true},
        "options": {"min": 0, "decimalPlaces": 2}
    });

    let def: FieldDef = serde_json::from_value(src.clone()).unwrap();
    assert_eq!(def.model, "number");
    assert!(!def.nullable);
    assert_eq!(serde_json::to_value(&def).unwrap(), json!({
        "name": "price",
        "model": "number",
        "required": true,
        "nullable": false,
        "conditionalLogic": {"forSale": true},
        "options": {"min": 0, "decimalPlaces": 2}
    }));
}

#[test]
fn definitions_append_named_sanitizers_and_validators() {
    tests::init_logging();

    let mut registry = ModelRegistry::new();
    registry.register_sanitizer("lowercase", |value, _| match value {
        Value::String(text) => Value::String(text.to_lowercase()),
        value => value,
    });
    registry.register_validator("prefixed", |value, cx| {
        let prefix = cx.options().get("prefix").and_then(Value::as_str).unwrap_or("");
        match value.as_str() {
            Some(text) if !text.starts_with(prefix) => {
                Err(Message::custom(format!("Must start with `{prefix}`")))
            }
            _ => Ok(()),
        }
    });

    let defs = json!([
        {
            "name": "slug",
            "model": "text",
            "sanitizers": ["lowercase"],
            "validators": ["prefixed"],
            "customOptions": {"prefix": "post-"}
        },
        {
            "name": "page",
            "model": "text",
            "sanitizers": ["lowercase"],
            "validators": ["prefixed"],
            "customOptions": {"prefix": "post-"},
            "options": {"prefix": "page-"}
        }
    ]);
    let fields = assert_ok!(registry.build_from_json(&defs.to_string()));

    // The model's own `trim` runs before the appended sanitizer.
    let record = assert_accepted!(Pipeline::new(&fields, Operation::Update).run(json!({
        "slug": "  POST-Hello "
    })));
    assert_eq!(record, json!({"slug": "post-hello"}));

    let errors = assert_rejected!(Pipeline::new(&fields, Operation::Update).run(json!({
        "slug": "Hello",
        "page": "Post-x"
    })));
    assert_eq!(errors.get("slug"), Some("Must start with `post-`"));
    assert_eq!(errors.get("page"), Some("Must start with `page-`"));

    // Built-in checks still come first.
    let errors = assert_rejected!(Pipeline::new(&fields, Operation::Update).run(json!({
        "slug": 7
    })));
    assert_eq!(errors.get("slug"), Some("The value must be a string"));
}

#[test]
fn plain_definitions_share_the_registered_model() {
    let registry = ModelRegistry::new();
    let fields = assert_ok!(registry.build(&[
        serde_json::from_value(json!({"name": "a", "model": "text"})).unwrap(),
        serde_json::from_value(json!({"name": "b", "model": "text", "validators": ["string"]}))
            .unwrap(),
    ]));

    let text = registry.get("text").unwrap();
    assert!(Arc::ptr_eq(&fields.get("a").unwrap().model, text));
    assert!(!Arc::ptr_eq(&fields.get("b").unwrap().model, text));
    assert_eq!(fields.get("b").unwrap().model.name(), "text");
}

#[test]
fn omitted_options_are_gone_from_the_field() {
    let fields = assert_ok!(build(json!([
        {"name": "code", "model": "text", "omitOptions": ["trim"]}
    ])));

    let code = fields.get("code").unwrap();
    assert!(!code.options.contains("trim"));
    assert_eq!(
        code.model.default_options().names().collect::<Vec<_>>(),
        ["minLength", "maxLength"]
    );
    assert!(ModelRegistry::new()
        .get("text")
        .unwrap()
        .default_options()
        .contains("trim"));

    let err = assert_err!(build(json!([
        {"name": "code", "model": "text", "omitOptions": ["trim"], "options": {"trim": false}}
    ])));
    assert_eq!(
        err.to_string(),
        "invalid schema: field `code` sets option `trim`, which model `text` does not declare"
    );

    let err = assert_err!(build(json!([
        {"name": "code", "model": "text", "omitOptions": ["colour"]}
    ])));
    assert_eq!(
        err.to_string(),
        "invalid schema: field `code` omits option `colour`, which model `text` does not declare"
    );
}

#[test]
fn custom_options_cannot_shadow_declared_ones() {
    let err = assert_err!(build(json!([
        {"name": "n", "model": "number", "customOptions": {"min": 1}}
    ])));
    assert_eq!(
        err.to_string(),
        "invalid schema: field `n` declares custom option `min`, which model `number` already has"
    );

    // Omitting first makes room for a replacement.
    let fields = assert_ok!(build(json!([
        {"name": "n", "model": "number", "omitOptions": ["min"], "customOptions": {"min": 1}}
    ])));
    assert_eq!(fields.get("n").unwrap().options.f64("min"), Some(1.0));
}

#[test]
fn rejects_unknown_chain_entries() {
    let err = assert_err!(build(json!([
        {"name": "a", "model": "text", "sanitizers": ["rot13"]}
    ])));
    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: field `a` uses unknown sanitizer `rot13`"
    );

    let err = assert_err!(build(json!([
        {"name": "a", "model": "text", "validators": ["palindrome"]}
    ])));
    assert_eq!(
        err.to_string(),
        "invalid schema: field `a` uses unknown validator `palindrome`"
    );
}

#[test]
fn ui_options_are_carried_through() {
    let src = json!({
        "name": "body",
        "model": "text",
        "uiOptions": {"widget": "textarea", "rows": 8}
    });

    let fields = assert_ok!(build(json!([src.clone()])));
    let body = fields.get("body").unwrap();
    assert_eq!(body.ui_options.get("widget"), Some(&json!("textarea")));
    assert_eq!(body.ui_options.usize("rows"), Some(8));
    assert!(!body.options.contains("widget"));

    let def: FieldDef = serde_json::from_value(src).unwrap();
    assert_eq!(
        serde_json::to_value(&def).unwrap()["uiOptions"],
        json!({"widget": "textarea", "rows": 8})
    );
}
