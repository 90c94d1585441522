//! Token blacklist DTO.

use admisiones_core::types::{DbId, Timestamp};

/// DTO for blacklisting a token. Only the SHA-256 hex digest is stored.
#[derive(Debug)]
pub struct CreateBlacklistEntry {
    pub token_hash: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}
