//! First-run administrator provisioning.
//!
//! Registration only ever creates applicants, so the first admin account is
//! seeded from the environment at startup.

use admisiones_core::registro::{check_password_policy, normalize_email};
use admisiones_core::roles::ROLE_ADMIN;
use admisiones_db::models::usuario::CreateUsuario;
use admisiones_db::repositories::UsuarioRepo;
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Administrator account described by `ADMIN_*` environment variables.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub nombres: String,
    pub apellidos: String,
    pub numero_documento: String,
}

impl AdminSeed {
    /// Read the seed from the environment.
    ///
    /// | Env Var            | Default          |
    /// |--------------------|------------------|
    /// | `ADMIN_EMAIL`      | (none: skip)     |
    /// | `ADMIN_PASSWORD`   | (none: skip)     |
    /// | `ADMIN_NOMBRES`    | `Administrador`  |
    /// | `ADMIN_APELLIDOS`  | `Admisiones`     |
    /// | `ADMIN_DOCUMENTO`  | `ADMIN0001`      |
    ///
    /// Returns `None` unless both email and password are set.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("ADMIN_EMAIL").ok()?;
        let password = std::env::var("ADMIN_PASSWORD").ok()?;
        Some(Self {
            email: normalize_email(&email),
            password,
            nombres: std::env::var("ADMIN_NOMBRES").unwrap_or_else(|_| "Administrador".into()),
            apellidos: std::env::var("ADMIN_APELLIDOS").unwrap_or_else(|_| "Admisiones".into()),
            numero_documento: std::env::var("ADMIN_DOCUMENTO")
                .unwrap_or_else(|_| "ADMIN0001".into()),
        })
    }
}

/// Make sure the seeded account exists and holds the admin role.
///
/// An existing account with the same email is promoted; its password is
/// left untouched.
pub async fn ensure_admin(pool: &PgPool, seed: &AdminSeed) -> AppResult<()> {
    if let Some(existing) = UsuarioRepo::find_by_email(pool, &seed.email).await? {
        if existing.rol != ROLE_ADMIN {
            UsuarioRepo::set_rol(pool, existing.id, ROLE_ADMIN).await?;
            tracing::info!(user_id = existing.id, "Promoted existing account to admin");
        }
        return Ok(());
    }

    check_password_policy(&seed.password).map_err(AppError::BadRequest)?;
    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = UsuarioRepo::create(
        pool,
        &CreateUsuario {
            email: seed.email.clone(),
            password_hash,
            nombres: seed.nombres.clone(),
            apellidos: seed.apellidos.clone(),
            tipo_documento: "CC".to_string(),
            numero_documento: seed.numero_documento.clone(),
            rol: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = admin.id, email = %admin.email, "Admin account created");
    Ok(())
}
