//! Periodic removal of expired token blacklist rows.
//!
//! A blacklisted token only needs to be remembered until its `exp` claim
//! passes; after that signature validation rejects it on its own.

use std::time::Duration;

use admisiones_db::repositories::TokenBlacklistRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the pruning loop until `cancel` is triggered.
pub async fn run(pool: PgPool, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Token blacklist pruning started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Token blacklist pruning stopping");
                break;
            }
            _ = interval.tick() => {
                match TokenBlacklistRepo::delete_expired(&pool).await {
                    Ok(0) => tracing::debug!("Token blacklist: nothing to prune"),
                    Ok(deleted) => tracing::info!(deleted, "Token blacklist: pruned expired rows"),
                    Err(e) => tracing::error!(error = %e, "Token blacklist: prune failed"),
                }
            }
        }
    }
}
