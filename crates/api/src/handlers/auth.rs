//! Handlers for the `/auth` resource.

use admisiones_core::catalog::Catalog;
use admisiones_core::error::CoreError;
use admisiones_core::naming::canonicalize_keys;
use admisiones_core::registro::{
    check_password_policy, normalize_email, validate_perfil, validate_registro,
};
use admisiones_core::roles::ROLE_ASPIRANTE;
use admisiones_core::validation::{FieldMap, ValidationReport};
use admisiones_db::models::token_blacklist::CreateBlacklistEntry;
use admisiones_db::models::usuario::{CreateUsuario, UsuarioResponse};
use admisiones_db::repositories::{TokenBlacklistRepo, UsuarioRepo};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_token, hash_token, Claims};
use crate::auth::password::{hash_password, verify_dummy_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Message for both unknown email and wrong password.
const MSG_INVALID_CREDENTIALS: &str = "Correo o contraseña incorrectos";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login` and `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Este campo es obligatorio"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Este campo es obligatorio"))]
    pub password: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[serde(default, alias = "currentPassword")]
    #[validate(length(min = 1, message = "Este campo es obligatorio"))]
    pub current_password: String,
    #[serde(default, alias = "newPassword")]
    #[validate(length(min = 1, message = "Este campo es obligatorio"))]
    pub new_password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UsuarioResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an applicant account. Returns 201 with the new user.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<FieldMap>,
) -> AppResult<ApiResponse<UsuarioResponse>> {
    let registro = validate_registro(&canonicalize_keys(input))?.value;

    let password_hash = hash_password(&registro.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let usuario = UsuarioRepo::create(
        &state.pool,
        &CreateUsuario {
            email: registro.email,
            password_hash,
            nombres: registro.perfil.nombres,
            apellidos: registro.perfil.apellidos,
            tipo_documento: registro.perfil.tipo_documento.as_str().to_string(),
            numero_documento: registro.perfil.numero_documento,
            rol: ROLE_ASPIRANTE.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = usuario.id, email = %usuario.email, "User registered");
    Ok(ApiResponse::created(
        "Usuario registrado correctamente",
        usuario.into(),
    ))
}

/// POST /api/login (alias: /api/auth/login)
///
/// Authenticate with email + password. Unknown email and wrong password
/// produce the same 401 after the same Argon2 work; the account-active check
/// only runs after the password verifies.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    input.validate().map_err(ValidationReport::from)?;
    let email = normalize_email(&input.email);

    let Some(usuario) = UsuarioRepo::find_by_email(&state.pool, &email).await? else {
        verify_dummy_password(&input.password);
        tracing::warn!(email = %email, reason = "unknown_email", "Login failed");
        return Err(CoreError::Unauthorized(MSG_INVALID_CREDENTIALS.into()).into());
    };

    let password_valid = verify_password(&input.password, &usuario.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(email = %email, user_id = usuario.id, reason = "wrong_password", "Login failed");
        return Err(CoreError::Unauthorized(MSG_INVALID_CREDENTIALS.into()).into());
    }

    if !usuario.activo {
        tracing::warn!(user_id = usuario.id, reason = "inactive", "Login refused");
        return Err(CoreError::Forbidden("La cuenta está inactiva".into()).into());
    }

    let token = generate_token(&usuario, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    // Best-effort: a failed timestamp update must not fail the login.
    if let Err(e) = UsuarioRepo::record_login(&state.pool, usuario.id).await {
        tracing::warn!(user_id = usuario.id, error = %e, "Failed to record last access");
    }

    tracing::info!(user_id = usuario.id, "Login succeeded");
    Ok(ApiResponse::ok(
        "Inicio de sesión exitoso",
        LoginResponse {
            token,
            token_type: "Bearer",
            expires_in: state.config.jwt.expiry_mins * 60,
            user: usuario.into(),
        },
    ))
}

/// POST /api/auth/logout
///
/// Blacklist the presented token until it would have expired anyway.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<ApiResponse<()>> {
    TokenBlacklistRepo::insert(
        &state.pool,
        &CreateBlacklistEntry {
            token_hash: hash_token(&user.token),
            user_id: user.user_id,
            expires_at: user.claims.expires_at(),
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, "Logged out");
    Ok(ApiResponse::ok("Sesión cerrada", ()))
}

/// POST /api/auth/validate
///
/// Returns the claims of a token that passed every check.
pub async fn validate(user: AuthUser) -> AppResult<ApiResponse<Claims>> {
    Ok(ApiResponse::ok("Token válido", user.claims))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<UsuarioResponse>> {
    let usuario = UsuarioRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Usuario",
            id: user.user_id,
        })?;
    Ok(ApiResponse::ok("Perfil del usuario", usuario.into()))
}

/// PUT /api/auth/profile
///
/// Replace the identity fields (names and document). Email and role are not
/// editable here.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<FieldMap>,
) -> AppResult<ApiResponse<UsuarioResponse>> {
    let perfil = validate_perfil(&canonicalize_keys(input))?.value;

    let usuario = UsuarioRepo::update_perfil(&state.pool, user.user_id, &perfil)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Usuario",
            id: user.user_id,
        })?;

    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(ApiResponse::ok("Perfil actualizado", usuario.into()))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    input.validate().map_err(ValidationReport::from)?;
    check_password_policy(&input.new_password)
        .map_err(|msg| ValidationReport::single("new_password", msg))?;
    if input.new_password == input.current_password {
        return Err(ValidationReport::single(
            "new_password",
            "La nueva contraseña debe ser distinta de la actual",
        )
        .into());
    }

    let usuario = UsuarioRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Usuario",
            id: user.user_id,
        })?;

    let current_valid = verify_password(&input.current_password, &usuario.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        tracing::warn!(user_id = user.user_id, "Password change with wrong current password");
        return Err(ValidationReport::single(
            "current_password",
            "La contraseña actual es incorrecta",
        )
        .into());
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UsuarioRepo::update_password(&state.pool, user.user_id, &password_hash).await?;

    tracing::info!(user_id = user.user_id, "Password changed");
    Ok(ApiResponse::ok("Contraseña actualizada", ()))
}
