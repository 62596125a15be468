use pretty_assertions::assert_eq;
use quire::{Dialect, Preparer};
use serde_json::json;
use tests::assert_err;

#[test]
fn dialect_from_configuration() {
    tests::init_logging();

    let config = json!({"dialect": "postgres"});
    let dialect: Dialect = serde_json::from_value(config["dialect"].clone()).unwrap();

    let query = Preparer::new(dialect).prepare(
        "select * from posts where slug = $slug and status = $status",
        &json!({"slug": "hello", "status": "published"}),
    );

    assert_eq!(
        query.sql(),
        "select * from posts where slug = $1 and status = $2"
    );
    assert_eq!(query.params().to_json(), json!(["hello", "published"]));
}

#[test]
fn unknown_dialects_are_rejected() {
    let err = assert_err!("mysql".parse::<Dialect>());
    assert!(err.is_unsupported_dialect());
}

#[test]
fn callers_choose_to_reject_unbound_parameters() {
    tests::init_logging();

    let query = Preparer::sqlite().prepare("delete from posts where id = $id", &json!({}));
    assert_eq!(query.sql(), "delete from posts where id = $p1");
    assert_eq!(query.params().to_json(), json!({"p1": null}));

    let err = assert_err!(query.check());
    assert!(err.is_exec());
}
