use chrono::Utc;
use libsql::{params, Connection};

use crate::error::{Result, VitrinaError};

pub struct WishlistRepository;

impl WishlistRepository {
    pub async fn create(conn: &Connection, user_id: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO wishlists (user_id, products, created_at, updated_at)
             VALUES (?1, '[]', ?2, ?2)",
            params![user_id, now],
        )
        .await?;

        Ok(())
    }

    pub async fn get(conn: &Connection, user_id: &str) -> Result<Vec<String>> {
        let mut rows = conn
            .query(
                "SELECT products FROM wishlists WHERE user_id = ?1",
                params![user_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            let raw: String = row.get(0)?;
            let products: Vec<String> = serde_json::from_str(&raw)?;
            Ok(products)
        } else {
            Ok(Vec::new())
        }
    }

    pub async fn put(conn: &Connection, user_id: &str, products: &[String]) -> Result<()> {
        let payload = serde_json::to_string(products)?;
        let affected = conn
            .execute(
                "UPDATE wishlists SET products = ?2, updated_at = ?3 WHERE user_id = ?1",
                params![user_id, payload, Utc::now().to_rfc3339()],
            )
            .await?;

        if affected == 0 {
            return Err(VitrinaError::NotFound(format!("User {user_id} not found")));
        }

        Ok(())
    }

    /// Append one URL; duplicates are intentionally preserved.
    pub async fn append(
        conn: &Connection,
        user_id: &str,
        product_url: &str,
    ) -> Result<Vec<String>> {
        let mut products = Self::get(conn, user_id).await?;
        products.push(product_url.to_string());
        Self::put(conn, user_id, &products).await?;
        Ok(products)
    }
}
