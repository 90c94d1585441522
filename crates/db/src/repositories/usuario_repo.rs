//! Repository for the `usuarios` table.

use admisiones_core::catalog::Catalog;
use admisiones_core::registro::PerfilData;
use admisiones_core::types::DbId;
use sqlx::PgPool;

use crate::models::usuario::{CreateUsuario, Usuario};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, nombres, apellidos, tipo_documento, \
                        numero_documento, rol, activo, fecha_registro, ultimo_acceso, updated_at";

/// Provides account operations. Users are never hard-deleted.
pub struct UsuarioRepo;

impl UsuarioRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUsuario) -> Result<Usuario, sqlx::Error> {
        let query = format!(
            "INSERT INTO usuarios
                (email, password_hash, nombres, apellidos, tipo_documento, numero_documento, rol)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Usuario>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.nombres)
            .bind(&input.apellidos)
            .bind(&input.tipo_documento)
            .bind(&input.numero_documento)
            .bind(&input.rol)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuarios WHERE id = $1");
        sqlx::query_as::<_, Usuario>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Emails are stored normalized (trimmed, lowercase),
    /// so callers must normalize before looking up.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuarios WHERE email = $1");
        sqlx::query_as::<_, Usuario>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Set `ultimo_acceso` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE usuarios SET ultimo_acceso = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Replace the identity fields of a user.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_perfil(
        pool: &PgPool,
        id: DbId,
        perfil: &PerfilData,
    ) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!(
            "UPDATE usuarios SET
                nombres = $2,
                apellidos = $3,
                tipo_documento = $4,
                numero_documento = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Usuario>(&query)
            .bind(id)
            .bind(&perfil.nombres)
            .bind(&perfil.apellidos)
            .bind(perfil.tipo_documento.as_str())
            .bind(&perfil.numero_documento)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE usuarios SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-deactivate a user by setting `activo = false`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE usuarios SET activo = false WHERE id = $1 AND activo = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Change a user's role. Returns `true` if the row was updated.
    pub async fn set_rol(pool: &PgPool, id: DbId, rol: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE usuarios SET rol = $2 WHERE id = $1")
            .bind(id)
            .bind(rol)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
