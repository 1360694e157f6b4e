use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Product catalog with vector embedding
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            uri TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            embedding F32_BLOB(384),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_products_created_at ON products(created_at);

        -- Chat sessions, one JSON map per user: chat name -> turns
        CREATE TABLE IF NOT EXISTS user_sessions (
            user_id TEXT PRIMARY KEY,
            chat_sessions TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- Wishlists, one JSON array of product URLs per user
        CREATE TABLE IF NOT EXISTS wishlists (
            user_id TEXT PRIMARY KEY,
            products TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .await?;

    Ok(())
}
