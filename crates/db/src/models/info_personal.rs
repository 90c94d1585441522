//! InfoPersonal row model.

use admisiones_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `info_personal` table (one per user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InfoPersonal {
    pub id: DbId,
    pub usuario_id: DbId,
    pub fecha_nacimiento: NaiveDate,
    pub genero: String,
    pub estado_civil: Option<String>,
    pub grupo_sanguineo: Option<String>,
    pub direccion: String,
    pub ciudad: String,
    pub departamento: String,
    pub telefono: String,
    pub telefono_alternativo: Option<String>,
    pub estrato: i16,
    pub nacionalidad: Option<String>,
    pub lugar_nacimiento: Option<String>,
    pub eps: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
