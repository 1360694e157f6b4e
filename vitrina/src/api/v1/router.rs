use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let sessions = Router::new().route(
        "/{userId}",
        get(handlers::sessions::get_sessions).put(handlers::sessions::put_sessions),
    );

    let wishlist = Router::new().route(
        "/{userId}",
        get(handlers::wishlist::get_wishlist)
            .post(handlers::wishlist::add_to_wishlist)
            .put(handlers::wishlist::put_wishlist),
    );

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/catalog:ingest", post(handlers::catalog::ingest_catalog))
        .nest("/sessions", sessions)
        .nest("/wishlist", wishlist)
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
