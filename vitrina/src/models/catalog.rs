use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable catalog reference data for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Opaque product identifier / image location.
    pub uri: String,
    pub description: String,
}

/// A catalog item returned by nearest-neighbor search, not yet validated
/// against the strict matching rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub product: ProductRecord,
    /// Position in the top-K result, 0 = most similar. Used as the tie
    /// breaker during ranking.
    pub rank: usize,
}

/// Raw nearest-neighbor hit as produced by the catalog index.
#[derive(Debug, Clone)]
pub struct ScoredProduct {
    pub id: String,
    pub uri: String,
    pub description: String,
    pub score: f32,
}

/// A stored catalog row.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub uri: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    pub fn new(uri: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: nanoid::nanoid!(),
            uri: uri.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ingestion input: one product to embed and upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub description: String,
    pub uri: String,
}

/// Outcome of one catalog ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSummary {
    pub ingested: usize,
}
