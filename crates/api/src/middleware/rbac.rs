//! Role gate for staff-only routes.

use admisiones_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// An [`AuthUser`] whose current role is `admin`.
///
/// Authentication failures keep their 401; an authenticated applicant gets
/// 403 and a warning in the log.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> AppResult<Self> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            return Ok(RequireAdmin(user));
        }
        tracing::warn!(
            user_id = user.user_id,
            rol = %user.rol,
            path = %parts.uri.path(),
            "Admin route refused"
        );
        Err(CoreError::Forbidden("Se requiere rol de administrador".into()).into())
    }
}
