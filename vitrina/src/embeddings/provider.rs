use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::{Arc, Mutex};

use crate::config::{parse_provider_model, EmbeddingsConfig};
use crate::embeddings::api::{default_base_url, ApiConfig, EmbeddingApiClient};
use crate::error::{Result, VitrinaError};

enum EmbeddingBackend {
    Local {
        model: Arc<Mutex<TextEmbedding>>,
        batch_size: usize,
    },
    Api {
        client: EmbeddingApiClient,
        batch_size: usize,
    },
}

pub struct EmbeddingProvider {
    backend: EmbeddingBackend,
    dimensions: usize,
}

impl EmbeddingProvider {
    pub fn new(config: &EmbeddingsConfig) -> Result<Self> {
        let (provider, model_name) = parse_provider_model(&config.model);

        let backend = if provider.eq_ignore_ascii_case("local") {
            let embedding_model = resolve_embedding_model(model_name);
            EmbeddingBackend::Local {
                model: Arc::new(Mutex::new(build_model(embedding_model)?)),
                batch_size: config.batch_size.clamp(1, 256),
            }
        } else {
            let api_config = ApiConfig {
                base_url: config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| default_base_url(provider).to_string()),
                api_key: config.api_key.clone(),
                model: model_name.to_string(),
                timeout_secs: config.timeout_secs,
                max_retries: config.max_retries,
            };
            EmbeddingBackend::Api {
                client: EmbeddingApiClient::new(api_config)?,
                batch_size: config.batch_size.clamp(1, 256),
            }
        };

        Ok(Self {
            backend,
            dimensions: config.dimensions,
        })
    }

    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        match &self.backend {
            EmbeddingBackend::Local { model, batch_size } => {
                let model = Arc::clone(model);
                let batch_size = *batch_size;
                tokio::task::spawn_blocking(move || {
                    let mut model = model.lock().map_err(|e| {
                        VitrinaError::Embedding(format!("Embedding model lock poisoned: {e}"))
                    })?;
                    model
                        .embed(texts, Some(batch_size))
                        .map_err(|e| VitrinaError::Embedding(e.to_string()))
                })
                .await
                .map_err(|e| VitrinaError::Embedding(format!("Embedding worker failed: {e}")))?
            }
            EmbeddingBackend::Api { client, .. } => {
                let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
                client.embed(&refs).await
            }
        }
    }

    pub async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed(vec![text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| VitrinaError::Embedding("No embedding generated".to_string()))
    }

    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        match &self.backend {
            EmbeddingBackend::Local { .. } => {
                // Local models use query: prefix
                let prefixed = format!("query: {query}");
                self.embed_single(&prefixed).await
            }
            EmbeddingBackend::Api { .. } => self.embed_single(query).await,
        }
    }

    pub async fn embed_passages(&self, passages: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if passages.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = match &self.backend {
            EmbeddingBackend::Local { batch_size, .. } => *batch_size,
            EmbeddingBackend::Api { batch_size, .. } => *batch_size,
        };

        let mut all_embeddings = Vec::with_capacity(passages.len());
        for batch in passages.chunks(batch_size) {
            let prepared: Vec<String> = match &self.backend {
                // Local models use passage: prefix
                EmbeddingBackend::Local { .. } => {
                    batch.iter().map(|p| format!("passage: {p}")).collect()
                }
                EmbeddingBackend::Api { .. } => batch.to_vec(),
            };
            let mut embedded = self.embed(prepared).await?;
            all_embeddings.append(&mut embedded);
            tokio::task::yield_now().await;
        }

        Ok(all_embeddings)
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl Clone for EmbeddingProvider {
    fn clone(&self) -> Self {
        match &self.backend {
            EmbeddingBackend::Local { model, batch_size } => Self {
                backend: EmbeddingBackend::Local {
                    model: Arc::clone(model),
                    batch_size: *batch_size,
                },
                dimensions: self.dimensions,
            },
            EmbeddingBackend::Api { client, batch_size } => Self {
                backend: EmbeddingBackend::Api {
                    client: client.clone(),
                    batch_size: *batch_size,
                },
                dimensions: self.dimensions,
            },
        }
    }
}

fn resolve_embedding_model(model_name: &str) -> EmbeddingModel {
    match model_name {
        "BAAI/bge-small-en-v1.5" | "bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "BAAI/bge-base-en-v1.5" | "bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        "BAAI/bge-large-en-v1.5" | "bge-large-en-v1.5" => EmbeddingModel::BGELargeENV15,
        "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => {
            EmbeddingModel::AllMiniLML6V2
        }
        "all-MiniLM-L12-v2" | "sentence-transformers/all-MiniLM-L12-v2" => {
            EmbeddingModel::AllMiniLML12V2
        }
        "nomic-embed-text-v1" | "nomic-ai/nomic-embed-text-v1" => EmbeddingModel::NomicEmbedTextV1,
        "nomic-embed-text-v1.5" | "nomic-ai/nomic-embed-text-v1.5" => {
            EmbeddingModel::NomicEmbedTextV15
        }
        _ => EmbeddingModel::BGESmallENV15,
    }
}

fn build_model(embedding_model: EmbeddingModel) -> Result<TextEmbedding> {
    TextEmbedding::try_new(InitOptions::new(embedding_model).with_show_download_progress(true))
        .map_err(|e| VitrinaError::Embedding(e.to_string()))
}
