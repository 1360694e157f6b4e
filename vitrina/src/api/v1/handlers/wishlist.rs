//! v1 Wishlist handlers.

use axum::extract::{Path, State};
use validator::Validate;

use crate::api::v1::dto::{AddWishlistRequest, PutWishlistRequest, WishlistResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;

/// `GET /api/v1/wishlist/{userId}`
///
/// An unknown user reads as an empty wishlist.
#[utoipa::path(
    get,
    path = "/api/v1/wishlist/{userId}",
    tag = "wishlist",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user's wishlist", body = WishlistResponse),
    )
)]
pub async fn get_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResponse<WishlistResponse> {
    match state.db.get_wishlist(&user_id).await {
        Ok(products) => {
            let total = products.len() as u64;
            ApiResponse::success_with_meta(
                WishlistResponse { products },
                ResponseMeta { total: Some(total) },
            )
        }
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/wishlist/{userId}`
///
/// Appends one product URL. Duplicates are preserved by design.
#[utoipa::path(
    post,
    path = "/api/v1/wishlist/{userId}",
    tag = "wishlist",
    params(("userId" = String, Path, description = "User identifier")),
    request_body = AddWishlistRequest,
    responses(
        (status = 200, description = "Updated wishlist", body = WishlistResponse),
        (status = 404, description = "Unknown user", body = ApiError),
    )
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    axum::Json(req): axum::Json<AddWishlistRequest>,
) -> ApiResponse<WishlistResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state.db.append_wishlist(&user_id, &req.product_url).await {
        Ok(products) => ApiResponse::success(WishlistResponse { products }),
        Err(e) => e.into(),
    }
}

/// `PUT /api/v1/wishlist/{userId}`
///
/// Wholesale replacement of the user's wishlist.
#[utoipa::path(
    put,
    path = "/api/v1/wishlist/{userId}",
    tag = "wishlist",
    params(("userId" = String, Path, description = "User identifier")),
    request_body = PutWishlistRequest,
    responses(
        (status = 200, description = "Updated wishlist", body = WishlistResponse),
        (status = 404, description = "Unknown user", body = ApiError),
    )
)]
pub async fn put_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    axum::Json(req): axum::Json<PutWishlistRequest>,
) -> ApiResponse<WishlistResponse> {
    if let Err(e) = state.db.put_wishlist(&user_id, &req.products).await {
        return e.into();
    }

    ApiResponse::success(WishlistResponse {
        products: req.products,
    })
}
