//! v1 Session handlers.

use axum::extract::{Path, State};

use crate::api::v1::dto::{PutSessionsRequest, SessionsResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `GET /api/v1/sessions/{userId}`
///
/// An unknown user reads as an empty session map, matching the lenient
/// behavior of the presentation layer's first load.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{userId}",
    tag = "sessions",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user's chat sessions", body = SessionsResponse),
    )
)]
pub async fn get_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResponse<SessionsResponse> {
    match state.db.get_sessions(&user_id).await {
        Ok(map) => ApiResponse::success(SessionsResponse::from_map(map.unwrap_or_default())),
        Err(e) => e.into(),
    }
}

/// `PUT /api/v1/sessions/{userId}`
///
/// Wholesale replacement of the user's session map.
#[utoipa::path(
    put,
    path = "/api/v1/sessions/{userId}",
    tag = "sessions",
    params(("userId" = String, Path, description = "User identifier")),
    request_body = PutSessionsRequest,
    responses(
        (status = 200, description = "Sessions replaced", body = SessionsResponse),
        (status = 404, description = "Unknown user", body = ApiError),
    )
)]
pub async fn put_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    axum::Json(req): axum::Json<PutSessionsRequest>,
) -> ApiResponse<SessionsResponse> {
    let sessions = match req.into_map() {
        Ok(map) => map,
        Err(e) => return ApiResponse::error(ErrorCode::InvalidRequest, e),
    };

    if let Err(e) = state.db.put_sessions(&user_id, &sessions).await {
        return e.into();
    }

    ApiResponse::success(SessionsResponse::from_map(sessions))
}
