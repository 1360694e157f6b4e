use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ProductRow, ScoredProduct, SessionMap};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// Catalog rows and nearest-neighbor lookup over their embeddings.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn upsert_product(&self, product: &ProductRow) -> Result<()>;
    async fn update_product_embedding(&self, uri: &str, embedding: &[f32]) -> Result<()>;
    /// Top-K most similar products, best first, metadata attached.
    async fn search_nearest(&self, embedding: &[f32], top_k: u32) -> Result<Vec<ScoredProduct>>;
    async fn count_products(&self) -> Result<u64>;
}

/// Per-user chat-session persistence. The whole session map is read and
/// written wholesale, mirroring the presentation layer's save semantics.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn user_exists(&self, user_id: &str) -> Result<bool>;
    /// Creates the user's session row and an empty wishlist row.
    async fn create_user(&self, user_id: &str) -> Result<()>;
    async fn get_sessions(&self, user_id: &str) -> Result<Option<SessionMap>>;
    async fn put_sessions(&self, user_id: &str, sessions: &SessionMap) -> Result<()>;
}

/// Per-user wishlist persistence. Duplicates are preserved on append.
#[async_trait]
pub trait WishlistStore: Send + Sync {
    async fn get_wishlist(&self, user_id: &str) -> Result<Vec<String>>;
    async fn put_wishlist(&self, user_id: &str, products: &[String]) -> Result<()>;
    /// Appends one URL and returns the updated list.
    async fn append_wishlist(&self, user_id: &str, product_url: &str) -> Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// A complete storage backend combining all store traits plus lifecycle
/// operations.
#[async_trait]
pub trait StorageBackend: CatalogStore + SessionStore + WishlistStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}
