//! Chat request/response DTOs for the v1 API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{MatchResult, SearchOutcome};

/// Request body for `POST /v1/chat`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Stable identifier of the user owning the session.
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    /// Chat session to continue. When absent a new session is created.
    pub chat_name: Option<String>,
    /// The user's message for this turn.
    #[validate(length(min = 1, max = 500))]
    pub message: String,
}

/// One validated product match on the wire.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ProductMatch {
    /// Short summary of why the product matched.
    #[serde(rename = "match")]
    pub match_label: String,
    pub match_percentage: f64,
    pub product_url: String,
    pub product_description: String,
}

impl From<MatchResult> for ProductMatch {
    fn from(result: MatchResult) -> Self {
        Self {
            match_label: result.match_label,
            match_percentage: result.match_percentage,
            product_url: result.product_url,
            product_description: result.product_description,
        }
    }
}

/// Response body for `POST /v1/chat`.
///
/// Either `results` is non-empty or `fallback_response` is set, never both.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The session this turn was recorded under.
    pub chat_name: String,
    /// The contextualized query the pipeline searched with.
    pub query: String,
    pub results: Vec<ProductMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_response: Option<String>,
}

impl ChatResponse {
    pub fn from_outcome(chat_name: String, outcome: SearchOutcome) -> Self {
        Self {
            chat_name,
            query: outcome.query,
            results: outcome.results.into_iter().map(Into::into).collect(),
            fallback_response: outcome.fallback_response,
        }
    }
}
