use quire::{Collection, Error, Fields, ModelRegistry, PreparedQuery, ResolvedPathMap};

fn assert_sync_send<T: Send + Sync>() {}

#[test]
fn shared_types_are_sync_send() {
    assert_sync_send::<Collection>();
    assert_sync_send::<Error>();
    assert_sync_send::<Fields>();
    assert_sync_send::<ModelRegistry>();
    assert_sync_send::<PreparedQuery>();
    assert_sync_send::<ResolvedPathMap>();
}

#[tokio::test]
async fn read_future_is_send() {
    let posts = Collection::from_json(
        "posts",
        &ModelRegistry::new(),
        r#"[{"name": "title", "model": "text"}]"#,
    )
    .unwrap();

    let stored = serde_json::json!({"title": "x"});
    let handle = tokio::spawn(async move { posts.read(&stored).await });

    assert_eq!(
        handle.await.unwrap().unwrap(),
        serde_json::json!({"title": "x"})
    );
}
