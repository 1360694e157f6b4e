use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vitrina API",
        version = "1.0.0",
        description = "Conversational shopping assistant. REST API for chat, sessions, wishlists, and catalog ingestion.",
    ),
    paths(
        handlers::health::health_check,
        handlers::chat::chat,
        handlers::sessions::get_sessions,
        handlers::sessions::put_sessions,
        handlers::wishlist::get_wishlist,
        handlers::wishlist::add_to_wishlist,
        handlers::wishlist::put_wishlist,
        handlers::catalog::ingest_catalog,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Health
        handlers::health::HealthResponse,
        // Chat
        dto::chat::ChatRequest,
        dto::chat::ChatResponse,
        dto::chat::ProductMatch,
        // Sessions
        dto::sessions::TurnDto,
        dto::sessions::SessionsResponse,
        dto::sessions::PutSessionsRequest,
        // Wishlist
        dto::wishlist::WishlistResponse,
        dto::wishlist::AddWishlistRequest,
        dto::wishlist::PutWishlistRequest,
        // Catalog
        dto::catalog::IngestProduct,
        dto::catalog::IngestRequest,
        dto::catalog::IngestResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "chat", description = "Conversational product search"),
        (name = "sessions", description = "Chat session persistence"),
        (name = "wishlist", description = "Wishlist persistence"),
        (name = "catalog", description = "Catalog ingestion"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
