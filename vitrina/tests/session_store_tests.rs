mod common;

use common::{mock_embedding_server, setup_backend, test_config};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use vitrina::error::VitrinaError;
use vitrina::models::{ConversationTurn, SessionMap};

async fn scratch_backend() -> (std::sync::Arc<dyn vitrina::db::StorageBackend>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("store.db");
    let embedding_server = mock_embedding_server().await;
    let config = test_config(
        format!("file:{}", db_path.to_str().unwrap()),
        &embedding_server,
        None,
    );
    let backend = setup_backend(&config).await;
    (backend, temp_dir)
}

#[tokio::test]
async fn test_user_bootstrap() {
    let (db, _temp_dir) = scratch_backend().await;

    assert!(!db.user_exists("42").await.unwrap());

    db.create_user("42").await.unwrap();
    assert!(db.user_exists("42").await.unwrap());

    // Bootstrap creates an empty session map and an empty wishlist.
    let sessions = db.get_sessions("42").await.unwrap().expect("session row");
    assert!(sessions.is_empty());
    assert!(db.get_wishlist("42").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sessions_roundtrip_preserves_turn_order() {
    let (db, _temp_dir) = scratch_backend().await;
    db.create_user("42").await.unwrap();

    let mut sessions = SessionMap::new();
    sessions.insert(
        "42_Chat_1".to_string(),
        vec![
            ConversationTurn::user("I want tshirts"),
            ConversationTurn::assistant("{\"results\":[]}"),
            ConversationTurn::user("for boys"),
            ConversationTurn::assistant("{\"results\":[]}"),
        ],
    );

    db.put_sessions("42", &sessions).await.unwrap();

    let restored = db.get_sessions("42").await.unwrap().expect("session row");
    let turns = restored.get("42_Chat_1").expect("chat turns");

    let texts: Vec<&str> = turns.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "I want tshirts",
            "{\"results\":[]}",
            "for boys",
            "{\"results\":[]}"
        ]
    );
}

#[tokio::test]
async fn test_get_sessions_for_unknown_user_is_none() {
    let (db, _temp_dir) = scratch_backend().await;
    assert!(db.get_sessions("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_put_sessions_for_unknown_user_is_not_found() {
    let (db, _temp_dir) = scratch_backend().await;

    let err = db
        .put_sessions("missing", &SessionMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, VitrinaError::NotFound(_)));
}

#[tokio::test]
async fn test_multiple_sessions_per_user() {
    let (db, _temp_dir) = scratch_backend().await;
    db.create_user("42").await.unwrap();

    let mut sessions = SessionMap::new();
    sessions.insert(
        "42_Chat_1".to_string(),
        vec![ConversationTurn::user("shoes")],
    );
    sessions.insert(
        "42_Chat_2".to_string(),
        vec![ConversationTurn::user("caps")],
    );

    db.put_sessions("42", &sessions).await.unwrap();

    let restored = db.get_sessions("42").await.unwrap().expect("session row");
    assert_eq!(restored.len(), 2);
    assert_eq!(restored["42_Chat_1"][0].text, "shoes");
    assert_eq!(restored["42_Chat_2"][0].text, "caps");
}
