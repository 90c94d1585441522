//! JWT-based authentication extractor for Axum handlers.

use admisiones_core::error::CoreError;
use admisiones_core::estado::Actor;
use admisiones_core::roles::ROLE_ADMIN;
use admisiones_core::types::DbId;
use admisiones_db::repositories::{TokenBlacklistRepo, UsuarioRepo};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::{hash_token, validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal resolved from the `Authorization: Bearer` header.
///
/// Resolution verifies the signature and expiry, rejects blacklisted tokens
/// and re-checks that the account still exists and is active. Handlers take
/// it as a parameter:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, rol = %user.rol, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Current role, read from the database rather than the token.
    pub rol: String,
    /// The raw bearer token, needed to blacklist it on logout.
    pub token: String,
    pub claims: Claims,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.rol == ROLE_ADMIN
    }

    /// The state-machine actor this principal acts as.
    pub fn actor(&self) -> Actor {
        if self.is_admin() {
            Actor::Admin
        } else {
            Actor::Aspirante
        }
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Falta el encabezado Authorization"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| unauthorized("Formato de Authorization inválido. Use: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Token inválido o expirado"))?;

        if TokenBlacklistRepo::is_blacklisted(&state.pool, &hash_token(token)).await? {
            tracing::debug!(user_id = claims.sub, "Rejected blacklisted token");
            return Err(unauthorized("La sesión fue cerrada"));
        }

        let usuario = UsuarioRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|u| u.activo)
            .ok_or_else(|| {
                tracing::debug!(user_id = claims.sub, "Token for missing or inactive account");
                unauthorized("La cuenta no existe o está inactiva")
            })?;

        Ok(AuthUser {
            user_id: usuario.id,
            rol: usuario.rol,
            token: token.to_string(),
            claims,
        })
    }
}
