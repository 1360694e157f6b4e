//! Wishlist request/response DTOs for the v1 API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Response body for wishlist reads and writes.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    /// Product URLs in append order. Duplicates are preserved.
    pub products: Vec<String>,
}

/// Request body for `POST /v1/wishlist/{userId}` — append one URL.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistRequest {
    #[validate(length(min = 1, max = 2048))]
    pub product_url: String,
}

/// Request body for `PUT /v1/wishlist/{userId}` — wholesale replacement.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PutWishlistRequest {
    pub products: Vec<String>,
}
