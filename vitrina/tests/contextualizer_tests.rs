mod common;

use common::{chat_completion_body, mock_embedding_server, test_config, test_llm_config};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vitrina::llm::LlmProvider;
use vitrina::services::QueryContextualizer;

async fn contextualizer_with_mock(llm_server: &MockServer) -> QueryContextualizer {
    let embedding_server = mock_embedding_server().await;
    let llm = test_llm_config(llm_server);
    let config = test_config(":memory:".to_string(), &embedding_server, Some(llm.clone()));
    QueryContextualizer::new(LlmProvider::new(Some(&llm)), &config)
}

/// Empty history passes the query through verbatim, no reasoning call made.
#[tokio::test]
async fn test_attribute_only_query_without_history_passes_through() {
    let llm_server = MockServer::start().await;
    // No mock mounted: any request would fail loudly. None should happen.
    let contextualizer = contextualizer_with_mock(&llm_server).await;

    let result = contextualizer.contextualize(&[], "blue color").await;

    assert_eq!(result, "blue color");
    assert!(llm_server.received_requests().await.unwrap().is_empty());
}

/// The canonical anchoring example: the dangling color resolves against the
/// most recent category (shoes), not the older one (tshirts).
#[tokio::test]
async fn test_dangling_attribute_anchors_to_latest_category() {
    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Previous queries"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion_body("\"shoes with blue color\"")),
        )
        .mount(&llm_server)
        .await;

    let contextualizer = contextualizer_with_mock(&llm_server).await;

    let history = vec![
        "I want tshirts".to_string(),
        "for boys".to_string(),
        "white color".to_string(),
        "shoes".to_string(),
        "black color".to_string(),
    ];
    let result = contextualizer.contextualize(&history, "blue color").await;

    assert!(result.contains("shoes"));
    assert!(result.contains("blue"));
    assert!(!result.contains("tshirts"));
}

/// Repeated calls with the same history hit the cache, not the service.
#[tokio::test]
async fn test_contextualization_is_memoized() {
    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion_body("\"shoes with blue color\"")),
        )
        .mount(&llm_server)
        .await;

    let contextualizer = contextualizer_with_mock(&llm_server).await;
    let history = vec!["shoes".to_string()];

    let first = contextualizer.contextualize(&history, "blue color").await;
    let second = contextualizer.contextualize(&history, "blue color").await;

    assert_eq!(first, second);
    assert_eq!(
        llm_server.received_requests().await.unwrap().len(),
        1,
        "second call must be served from the cache"
    );
}

/// A reasoning failure degrades to the raw query, never an error.
#[tokio::test]
async fn test_reasoning_error_degrades_to_raw_query() {
    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&llm_server)
        .await;

    let contextualizer = contextualizer_with_mock(&llm_server).await;

    let history = vec!["shoes".to_string()];
    let result = contextualizer.contextualize(&history, "blue color").await;

    assert_eq!(result, "blue color");
}
