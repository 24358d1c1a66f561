use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub account_id: Uuid,
    pub content: String,
    pub created_at: OffsetDateTime,
}

/// A post joined with the owning account's email for display.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub content: String,
    pub author_email: String,
    pub created_at: OffsetDateTime,
}

impl Post {
    /// Persist a post for an account. The caller has already validated the
    /// content; the timestamp is assigned by the database.
    pub async fn create(db: &PgPool, account_id: Uuid, content: &str) -> Result<Post, ApiError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (account_id, content)
            VALUES ($1, $2)
            RETURNING id, account_id, content, created_at
            "#,
        )
        .bind(account_id)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(post)
    }

    /// All posts, newest first, each carrying its author's email. Ties on
    /// created_at break by id so the order is stable within one store.
    pub async fn list_all(db: &PgPool) -> Result<Vec<PostWithAuthor>, ApiError> {
        let rows = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.content, a.email AS author_email, p.created_at
            FROM posts p
            JOIN accounts a ON a.id = p.account_id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
