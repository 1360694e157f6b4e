#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use vitrina::api::{create_router, AppState};
use vitrina::config::{
    AssistantConfig, Config, DatabaseConfig, EmbeddingsConfig, LlmConfig, ServerConfig,
};
use vitrina::db::{Database, LibSqlBackend, StorageBackend};
use vitrina::embeddings::EmbeddingProvider;
use vitrina::llm::LlmProvider;

pub const TEST_API_KEY: &str = "test-key";
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// Deterministic per-text embedding so tests never download a model.
pub fn test_embedding(text: &str) -> Vec<f32> {
    // FNV-1a seed, then a small LCG to fill the vector.
    let mut seed: u64 = 0xcbf29ce484222325;
    for byte in text.bytes() {
        seed ^= byte as u64;
        seed = seed.wrapping_mul(0x100000001b3);
    }

    let mut state = seed | 1;
    (0..EMBEDDING_DIMENSIONS)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as f32 / u32::MAX as f32) - 0.5
        })
        .collect()
}

/// Answers the OpenAI-compatible `/embeddings` endpoint with one vector per
/// input, derived from the input text.
pub struct EmbeddingResponder;

impl Respond for EmbeddingResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(value) => value,
            Err(_) => return ResponseTemplate::new(400),
        };

        let inputs: Vec<String> = match body.get("input") {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(serde_json::Value::String(single)) => vec![single.clone()],
            _ => return ResponseTemplate::new(400),
        };

        let data: Vec<serde_json::Value> = inputs
            .iter()
            .map(|text| json!({ "embedding": test_embedding(text) }))
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
    }
}

pub async fn mock_embedding_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(EmbeddingResponder)
        .mount(&server)
        .await;

    server
}

/// A complete chat-completion response wrapping `content`.
pub fn chat_completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 0,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 0, "completion_tokens": 0, "total_tokens": 0 }
    })
}

pub fn test_llm_config(llm_server: &MockServer) -> LlmConfig {
    LlmConfig {
        model: "openai/gpt-4o-mini".to_string(),
        api_key: Some(TEST_API_KEY.to_string()),
        base_url: Some(format!("{}/v1", llm_server.uri())),
        timeout_secs: 5,
        max_retries: 0,
        context_cache_size: 100,
        contextualize_timeout_secs: 5,
    }
}

pub fn test_config(db_url: String, embedding_server: &MockServer, llm: Option<LlmConfig>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            api_keys: vec![TEST_API_KEY.to_string()],
        },
        database: DatabaseConfig {
            url: db_url,
            auth_token: None,
            local_path: None,
        },
        embeddings: EmbeddingsConfig {
            model: "openai/text-embedding-3-small".to_string(),
            dimensions: EMBEDDING_DIMENSIONS,
            batch_size: 32,
            api_key: Some(TEST_API_KEY.to_string()),
            base_url: Some(format!("{}/v1", embedding_server.uri())),
            timeout_secs: 5,
            max_retries: 0,
        },
        assistant: AssistantConfig {
            top_k: 10,
            max_results: 4,
            match_threshold: 85.0,
            fallback_message: "Sorry, nothing matched.".to_string(),
        },
        llm,
    }
}

pub async fn setup_backend(config: &Config) -> Arc<dyn StorageBackend> {
    let db = Database::new(&config.database)
        .await
        .expect("Failed to create database");
    Arc::new(LibSqlBackend::new(db))
}

pub struct TestApp {
    pub addr: SocketAddr,
    pub state: AppState,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Boot a full app on a random port, backed by a scratch database and the
/// given mock servers.
pub async fn setup_test_app(embedding_server: &MockServer, llm: Option<LlmConfig>) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("vitrina.db");
    let db_url = format!("file:{}", db_path.to_str().unwrap());

    let config = test_config(db_url, embedding_server, llm);

    let db = setup_backend(&config).await;
    let embeddings =
        EmbeddingProvider::new(&config.embeddings).expect("Failed to create embeddings");
    let llm_provider = LlmProvider::new(config.llm.as_ref());

    let state = AppState::new(config, db, embeddings, llm_provider);
    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    TestApp {
        addr,
        state,
        _temp_dir: temp_dir,
    }
}
