//! Catalog ingestion DTOs for the v1 API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{IngestSummary, NewProduct};

/// One product to ingest.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IngestProduct {
    pub description: String,
    pub uri: String,
}

impl From<IngestProduct> for NewProduct {
    fn from(product: IngestProduct) -> Self {
        Self {
            description: product.description,
            uri: product.uri,
        }
    }
}

/// Request body for `POST /v1/catalog:ingest`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    #[validate(length(min = 1, max = 1000))]
    pub products: Vec<IngestProduct>,
}

/// Response body for `POST /v1/catalog:ingest`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub ingested: usize,
}

impl From<IngestSummary> for IngestResponse {
    fn from(summary: IngestSummary) -> Self {
        Self {
            ingested: summary.ingested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_ingest_request_deserializes() {
        let json = r#"{
            "products": [
                {"description": "Blue running shoes for men", "uri": "https://img.example/1.jpg"}
            ]
        }"#;
        let req: IngestRequest = serde_json::from_str(json).expect("deserialize");
        assert_eq!(req.products.len(), 1);
    }

    #[test]
    fn test_ingest_request_rejects_empty_batch() {
        let req = IngestRequest { products: vec![] };
        assert!(req.validate().is_err());
    }
}
