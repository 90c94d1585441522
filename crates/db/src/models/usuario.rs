//! Usuario entity model and DTOs.

use admisiones_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `usuarios` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UsuarioResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub nombres: String,
    pub apellidos: String,
    pub tipo_documento: String,
    pub numero_documento: String,
    pub rol: String,
    pub activo: bool,
    pub fecha_registro: Timestamp,
    pub ultimo_acceso: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl Usuario {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombres, self.apellidos)
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioResponse {
    pub id: DbId,
    pub email: String,
    pub nombres: String,
    pub apellidos: String,
    pub nombre_completo: String,
    pub tipo_documento: String,
    pub numero_documento: String,
    pub rol: String,
    pub activo: bool,
    pub fecha_registro: Timestamp,
    pub ultimo_acceso: Option<Timestamp>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        let nombre_completo = u.nombre_completo();
        Self {
            id: u.id,
            email: u.email,
            nombres: u.nombres,
            apellidos: u.apellidos,
            nombre_completo,
            tipo_documento: u.tipo_documento,
            numero_documento: u.numero_documento,
            rol: u.rol,
            activo: u.activo,
            fecha_registro: u.fecha_registro,
            ultimo_acceso: u.ultimo_acceso,
        }
    }
}

/// DTO for creating a new user. `password_hash` is already an Argon2 PHC string.
#[derive(Debug)]
pub struct CreateUsuario {
    pub email: String,
    pub password_hash: String,
    pub nombres: String,
    pub apellidos: String,
    pub tipo_documento: String,
    pub numero_documento: String,
    pub rol: String,
}
