//! InfoAcademica row model.

use admisiones_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `info_academica` table (one per user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InfoAcademica {
    pub id: DbId,
    pub user_id: DbId,
    pub institucion: String,
    pub ciudad_institucion: Option<String>,
    pub tipo_bachillerato: String,
    pub jornada: Option<String>,
    pub caracter_institucion: Option<String>,
    pub anio_graduacion: i32,
    pub titulo_obtenido: Option<String>,
    pub promedio_academico: Option<f64>,
    pub puntaje_icfes: Option<i32>,
    pub codigo_icfes: Option<String>,
    pub posicion_curso: Option<i32>,
    pub total_estudiantes: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
