//! v1 Catalog ingestion handler.

use axum::extract::State;
use validator::Validate;

use crate::api::v1::dto::{IngestRequest, IngestResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `POST /api/v1/catalog:ingest`
///
/// Embeds the given product descriptions and upserts them into the catalog
/// index. Re-ingesting a uri refreshes its description and vector.
#[utoipa::path(
    post,
    path = "/api/v1/catalog:ingest",
    tag = "catalog",
    request_body = IngestRequest,
    responses(
        (status = 200, description = "Products ingested", body = IngestResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn ingest_catalog(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<IngestRequest>,
) -> ApiResponse<IngestResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    let products = req.products.into_iter().map(Into::into).collect();

    match state.catalog.ingest(products).await {
        Ok(summary) => ApiResponse::success(summary.into()),
        Err(e) => e.into(),
    }
}
