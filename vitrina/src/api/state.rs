use std::sync::Arc;

use crate::config::Config;
use crate::db::StorageBackend;
use crate::embeddings::EmbeddingProvider;
use crate::llm::LlmProvider;
use crate::services::{CatalogService, ChatService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn StorageBackend>,
    pub embeddings: EmbeddingProvider,
    pub llm: LlmProvider,
    pub chat: ChatService,
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Arc<dyn StorageBackend>,
        embeddings: EmbeddingProvider,
        llm: LlmProvider,
    ) -> Self {
        let config = Arc::new(config);
        let chat = ChatService::new(db.clone(), embeddings.clone(), llm.clone(), &config);
        let catalog = CatalogService::new(db.clone(), embeddings.clone());

        Self {
            config,
            db,
            embeddings,
            llm,
            chat,
            catalog,
        }
    }
}
