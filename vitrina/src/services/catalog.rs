use std::path::Path;
use std::sync::Arc;

use url::Url;

use crate::db::StorageBackend;
use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, VitrinaError};
use crate::models::{IngestSummary, NewProduct, ProductRow};

/// Catalog ingestion: validate, upsert, embed descriptions in batches, and
/// attach the vectors the retriever searches over.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<dyn StorageBackend>,
    embeddings: EmbeddingProvider,
}

impl CatalogService {
    pub fn new(db: Arc<dyn StorageBackend>, embeddings: EmbeddingProvider) -> Self {
        Self { db, embeddings }
    }

    pub async fn ingest(&self, products: Vec<NewProduct>) -> Result<IngestSummary> {
        if products.is_empty() {
            return Err(VitrinaError::Validation(
                "Product list cannot be empty".to_string(),
            ));
        }

        for product in &products {
            if product.description.trim().is_empty() {
                return Err(VitrinaError::Validation(
                    "Product description cannot be empty".to_string(),
                ));
            }
            Url::parse(&product.uri).map_err(|e| {
                VitrinaError::Validation(format!("Invalid product uri '{}': {e}", product.uri))
            })?;
        }

        let rows: Vec<ProductRow> = products
            .iter()
            .map(|p| ProductRow::new(p.uri.trim(), p.description.trim()))
            .collect();

        for row in &rows {
            self.db.upsert_product(row).await?;
        }

        let descriptions: Vec<String> = rows.iter().map(|r| r.description.clone()).collect();
        let embeddings = self.embeddings.embed_passages(descriptions).await?;

        if embeddings.len() != rows.len() {
            return Err(VitrinaError::Embedding(format!(
                "Expected {} embeddings, got {}",
                rows.len(),
                embeddings.len()
            )));
        }

        for (row, embedding) in rows.iter().zip(embeddings.iter()) {
            self.db.update_product_embedding(&row.uri, embedding).await?;
        }

        tracing::info!(count = rows.len(), "Catalog products ingested");

        Ok(IngestSummary {
            ingested: rows.len(),
        })
    }

    /// Load a JSON catalog file (`[{"description": ..., "uri": ...}]`) and
    /// ingest it. Used by the binary's `--ingest` mode.
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestSummary> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<NewProduct> = serde_json::from_str(&raw)?;
        self.ingest(products).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.db.count_products().await
    }
}
