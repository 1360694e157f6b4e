use std::sync::Arc;

use crate::db::StorageBackend;
use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, VitrinaError};
use crate::models::{Candidate, ProductRecord};

/// Turns a contextualized query into a bounded list of catalog candidates:
/// one embedding call, one top-K nearest-neighbor lookup.
#[derive(Clone)]
pub struct CandidateRetriever {
    db: Arc<dyn StorageBackend>,
    embeddings: EmbeddingProvider,
    top_k: u32,
}

impl CandidateRetriever {
    pub fn new(db: Arc<dyn StorageBackend>, embeddings: EmbeddingProvider, top_k: u32) -> Self {
        Self {
            db,
            embeddings,
            top_k,
        }
    }

    /// At most `top_k` candidates, best first. Every candidate carries
    /// non-empty metadata; rows missing a description or uri are dropped.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<Candidate>> {
        let embedding = self
            .embeddings
            .embed_query(query)
            .await
            .map_err(|e| VitrinaError::Retrieval(format!("Query embedding failed: {e}")))?;

        let hits = self
            .db
            .search_nearest(&embedding, self.top_k)
            .await
            .map_err(|e| VitrinaError::Retrieval(format!("Index lookup failed: {e}")))?;

        let candidates: Vec<Candidate> = hits
            .into_iter()
            .filter(|hit| !hit.uri.trim().is_empty() && !hit.description.trim().is_empty())
            .enumerate()
            .map(|(rank, hit)| Candidate {
                product: ProductRecord {
                    uri: hit.uri,
                    description: hit.description,
                },
                rank,
            })
            .collect();

        tracing::debug!(
            count = candidates.len(),
            top_k = self.top_k,
            "Retrieved catalog candidates"
        );

        Ok(candidates)
    }
}
