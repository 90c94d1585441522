//! JWT generation/validation and blacklist token hashing.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. Logging out
//! blacklists a token by its SHA-256 hash, so a database leak does not expose
//! usable tokens.

use admisiones_core::types::{DbId, Timestamp};
use admisiones_db::models::usuario::Usuario;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub email: String,
    /// Full display name.
    pub nombre: String,
    pub tipo_documento: String,
    pub numero_documento: String,
    /// Role name (`"aspirante"` or `"admin"`).
    pub rol: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

impl Claims {
    /// Expiry as a timestamp; the blacklist keeps entries until then.
    pub fn expires_at(&self) -> Timestamp {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// Configuration for JWT generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 1440, one day).
    pub expiry_mins: i64,
}

/// Default token expiry in minutes.
const DEFAULT_EXPIRY_MINS: i64 = 1440;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_MINS` | no       | `1440`  |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");
        assert!(expiry_mins > 0, "JWT_EXPIRY_MINS must be positive");

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Generate an HS256 token for the given user.
pub fn generate_token(
    usuario: &Usuario,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: usuario.id,
        email: usuario.email.clone(),
        nombre: usuario.nombre_completo(),
        tipo_documento: usuario.tipo_documento.clone(),
        numero_documento: usuario.numero_documento.clone(),
        rol: usuario.rol.clone(),
        exp: now + config.expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry. Blacklist and account checks happen in
/// the [`AuthUser`](crate::middleware::auth::AuthUser) extractor.
///
/// Expiry is exact (no leeway): blacklist rows are pruned once `exp` has
/// passed, so a token must stop validating at that same instant.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.leeway = 0;
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Compute the SHA-256 hex digest of a token for blacklist storage.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
