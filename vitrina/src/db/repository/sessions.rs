use chrono::Utc;
use libsql::{params, Connection};

use crate::error::{Result, VitrinaError};
use crate::models::SessionMap;

pub struct SessionRepository;

impl SessionRepository {
    pub async fn exists(conn: &Connection, user_id: &str) -> Result<bool> {
        let mut rows = conn
            .query(
                "SELECT EXISTS(SELECT 1 FROM user_sessions WHERE user_id = ?1)",
                params![user_id],
            )
            .await?;

        let exists = match rows.next().await? {
            Some(row) => row.get::<i64>(0)? != 0,
            None => false,
        };
        Ok(exists)
    }

    pub async fn create(conn: &Connection, user_id: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO user_sessions (user_id, chat_sessions, created_at, updated_at)
             VALUES (?1, '{}', ?2, ?2)",
            params![user_id, now],
        )
        .await?;

        Ok(())
    }

    pub async fn get(conn: &Connection, user_id: &str) -> Result<Option<SessionMap>> {
        let mut rows = conn
            .query(
                "SELECT chat_sessions FROM user_sessions WHERE user_id = ?1",
                params![user_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            let raw: String = row.get(0)?;
            let sessions: SessionMap = serde_json::from_str(&raw)?;
            Ok(Some(sessions))
        } else {
            Ok(None)
        }
    }

    pub async fn put(conn: &Connection, user_id: &str, sessions: &SessionMap) -> Result<()> {
        let payload = serde_json::to_string(sessions)?;
        let affected = conn
            .execute(
                "UPDATE user_sessions SET chat_sessions = ?2, updated_at = ?3 WHERE user_id = ?1",
                params![user_id, payload, Utc::now().to_rfc3339()],
            )
            .await?;

        if affected == 0 {
            return Err(VitrinaError::NotFound(format!("User {user_id} not found")));
        }

        Ok(())
    }
}
