//! Repository for the `token_blacklist` table.

use sqlx::PgPool;

use crate::models::token_blacklist::CreateBlacklistEntry;

pub struct TokenBlacklistRepo;

impl TokenBlacklistRepo {
    /// Blacklist a token hash. Blacklisting the same token twice is a no-op.
    pub async fn insert(pool: &PgPool, input: &CreateBlacklistEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO token_blacklist (token_hash, user_id, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (token_hash) DO NOTHING",
        )
        .bind(&input.token_hash)
        .bind(input.user_id)
        .bind(input.expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Whether a token hash has been blacklisted.
    pub async fn is_blacklisted(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM token_blacklist WHERE token_hash = $1)")
                .bind(token_hash)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Delete entries whose token has expired on its own. Returns the count
    /// of deleted rows.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM token_blacklist WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
