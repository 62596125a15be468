use pretty_assertions::assert_eq;
use quire::{
    err, populate_record, Collection, FieldModel, Fields, ModelRegistry, PopulateContext,
    Populator, Result,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;

/// Resolves author ids to summarized author records. Every lookup waits on
/// a shared barrier, so the test hangs unless lookups run concurrently.
struct Authors {
    barrier: Arc<Barrier>,
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Populator for Authors {
    async fn populate(&self, value: Value, cx: &PopulateContext<'_>) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.barrier.wait().await;

        match value.as_i64() {
            Some(42) => Ok(json!({"id": 42, "name": "Ada", "path": cx.path})),
            Some(7) => Ok(json!({"id": 7, "name": "Grace", "path": cx.path})),
            _ => Err(err!("author {value} not found")),
        }
    }
}

fn registry(lookups: usize, calls: &Arc<AtomicUsize>) -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.register(
        FieldModel::builder("author", quire::DataType::Bigint)
            .default(0)
            .populator(Authors {
                barrier: Arc::new(Barrier::new(lookups)),
                calls: calls.clone(),
            })
            .build(),
    );
    registry
}

fn articles(registry: &ModelRegistry) -> Fields {
    let defs = json!([
        {"name": "title", "model": "text"},
        {"name": "author", "model": "author", "nullable": true},
        {
            "name": "quotes",
            "model": "repeater",
            "fields": [
                {"name": "text", "model": "text"},
                {"name": "by", "model": "author", "nullable": true}
            ]
        }
    ]);

    registry.build_from_json(&defs.to_string()).unwrap()
}

#[tokio::test]
async fn populators_run_concurrently_and_join() {
    tests::init_logging();
    let calls = Arc::new(AtomicUsize::new(0));
    let fields = articles(&registry(3, &calls));

    let record = json!({
        "title": "On engines",
        "author": 42,
        "quotes": [{"text": "a", "by": 7}, {"text": "b", "by": 42}]
    });

    let populated = tokio::time::timeout(
        Duration::from_secs(5),
        populate_record(&fields, record),
    )
    .await
        .expect("populators did not run concurrently")
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        populated,
        json!({
            "title": "On engines",
            "author": {"id": 42, "name": "Ada", "path": "author"},
            "quotes": [
                {"text": "a", "by": {"id": 7, "name": "Grace", "path": "quotes.0.by"}},
                {"text": "b", "by": {"id": 42, "name": "Ada", "path": "quotes.1.by"}}
            ]
        })
    );
}

#[tokio::test]
async fn absent_fields_are_not_populated() {
    tests::init_logging();
    let calls = Arc::new(AtomicUsize::new(0));
    let fields = articles(&registry(1, &calls));

    let populated = populate_record(&fields, json!({"title": "Untitled", "author": 7}))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(populated["author"]["name"], json!("Grace"));
    assert!(populated.get("quotes").is_none());
}

#[tokio::test]
async fn failures_name_the_field() {
    tests::init_logging();
    let calls = Arc::new(AtomicUsize::new(0));
    let fields = articles(&registry(1, &calls));

    let err = populate_record(&fields, json!({"author": 1})).await.unwrap_err();

    assert!(err.is_populate_failed());
    assert_eq!(
        err.to_string(),
        "populating field `author` failed: author 1 not found"
    );
}

#[tokio::test]
async fn collection_read_deserializes_then_populates() {
    tests::init_logging();
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = registry(1, &calls);

    let src = json!([
        {"name": "published", "model": "boolean"},
        {"name": "author", "model": "author"}
    ]);
    let posts = Collection::from_json("posts", &registry, &src.to_string()).unwrap();

    let created = posts
        .create(json!({"published": "yes", "author": 42}))
        .unwrap();
    let stored = posts.to_storage(&created);
    assert_eq!(stored, json!({"published": 1, "author": 42}));

    let read = posts.read(&stored).await.unwrap();
    assert_eq!(
        read,
        json!({"published": true, "author": {"id": 42, "name": "Ada", "path": "author"}})
    );
}
