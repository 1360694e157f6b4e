use async_trait::async_trait;

use crate::db::repository::{CatalogRepository, SessionRepository, WishlistRepository};
use crate::db::traits::{CatalogStore, SessionStore, StorageBackend, WishlistStore};
use crate::db::Database;
use crate::error::Result;
use crate::models::{ProductRow, ScoredProduct, SessionMap};

/// libsql-backed implementation of the storage traits. Each call opens a
/// fresh connection off the shared database handle, the way libsql expects.
pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogStore for LibSqlBackend {
    async fn upsert_product(&self, product: &ProductRow) -> Result<()> {
        let conn = self.db.connect()?;
        CatalogRepository::upsert(&conn, product).await
    }

    async fn update_product_embedding(&self, uri: &str, embedding: &[f32]) -> Result<()> {
        let conn = self.db.connect()?;
        CatalogRepository::update_embedding(&conn, uri, embedding).await
    }

    async fn search_nearest(&self, embedding: &[f32], top_k: u32) -> Result<Vec<ScoredProduct>> {
        let conn = self.db.connect()?;
        CatalogRepository::search_nearest(&conn, embedding, top_k).await
    }

    async fn count_products(&self) -> Result<u64> {
        let conn = self.db.connect()?;
        CatalogRepository::count(&conn).await
    }
}

#[async_trait]
impl SessionStore for LibSqlBackend {
    async fn user_exists(&self, user_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        SessionRepository::exists(&conn, user_id).await
    }

    async fn create_user(&self, user_id: &str) -> Result<()> {
        let conn = self.db.connect()?;
        SessionRepository::create(&conn, user_id).await?;
        WishlistRepository::create(&conn, user_id).await
    }

    async fn get_sessions(&self, user_id: &str) -> Result<Option<SessionMap>> {
        let conn = self.db.connect()?;
        SessionRepository::get(&conn, user_id).await
    }

    async fn put_sessions(&self, user_id: &str, sessions: &SessionMap) -> Result<()> {
        let conn = self.db.connect()?;
        SessionRepository::put(&conn, user_id, sessions).await
    }
}

#[async_trait]
impl WishlistStore for LibSqlBackend {
    async fn get_wishlist(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.db.connect()?;
        WishlistRepository::get(&conn, user_id).await
    }

    async fn put_wishlist(&self, user_id: &str, products: &[String]) -> Result<()> {
        let conn = self.db.connect()?;
        WishlistRepository::put(&conn, user_id, products).await
    }

    async fn append_wishlist(&self, user_id: &str, product_url: &str) -> Result<Vec<String>> {
        let conn = self.db.connect()?;
        WishlistRepository::append(&conn, user_id, product_url).await
    }
}

#[async_trait]
impl StorageBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
