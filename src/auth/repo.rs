use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::Account;
use crate::error::ApiError;

impl Account {
    /// Find an account by email. Lookups are case-sensitive, matching the
    /// uniqueness constraint.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<Account>, ApiError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, status, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Account>, ApiError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, status, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Persist a new pending account with a hashed password.
    ///
    /// Uniqueness is enforced by the index alone; of two concurrent signups
    /// with the same email, exactly one lands here as DuplicateEmail.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, ApiError> {
        let res = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, status, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await;

        match res {
            Ok(account) => Ok(account),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ApiError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Flip an account to approved. Single-row atomic write; the transition
    /// is one-way and re-running it is harmless.
    pub async fn approve(db: &PgPool, id: Uuid) -> Result<Account, ApiError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET status = 'approved'
            WHERE id = $1
            RETURNING id, email, password_hash, status, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::AccountNotFound)?;
        Ok(account)
    }
}
