use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{ProductRow, ScoredProduct};

pub struct CatalogRepository;

impl CatalogRepository {
    pub async fn upsert(conn: &Connection, product: &ProductRow) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO products (id, uri, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(uri) DO UPDATE SET
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
            params![
                product.id.clone(),
                product.uri.clone(),
                product.description.clone(),
                product.created_at.to_rfc3339(),
                product.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn update_embedding(conn: &Connection, uri: &str, embedding: &[f32]) -> Result<()> {
        let embedding_json = serde_json::to_string(embedding)?;

        conn.execute(
            "UPDATE products SET embedding = vector32(?2) WHERE uri = ?1",
            params![uri, embedding_json],
        )
        .await?;

        Ok(())
    }

    pub async fn search_nearest(
        conn: &Connection,
        embedding: &[f32],
        top_k: u32,
    ) -> Result<Vec<ScoredProduct>> {
        let embedding_json = serde_json::to_string(embedding)?;

        let mut rows = conn
            .query(
                r#"
                SELECT
                    id,
                    uri,
                    description,
                    1 - vector_distance_cos(embedding, vector32(?1)) as score
                FROM products
                WHERE embedding IS NOT NULL
                ORDER BY score DESC
                LIMIT ?2
                "#,
                params![embedding_json, top_k],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(ScoredProduct {
                id: row.get(0)?,
                uri: row.get(1)?,
                description: row.get(2)?,
                score: row.get::<f64>(3)? as f32,
            });
        }

        Ok(results)
    }

    pub async fn count(conn: &Connection) -> Result<u64> {
        let mut rows = conn.query("SELECT COUNT(*) FROM products", ()).await?;
        let count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)? as u64,
            None => 0,
        };
        Ok(count)
    }
}
