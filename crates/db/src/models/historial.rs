//! HistorialEstados row model and DTO.

use admisiones_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `historial_estados` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistorialEstado {
    pub id: DbId,
    pub solicitud_id: DbId,
    pub user_id: DbId,
    /// `None` only for the creation entry.
    pub estado_anterior: Option<String>,
    pub nuevo_estado: String,
    pub observacion: Option<String>,
    pub cambiado_por: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for appending a history entry.
#[derive(Debug)]
pub struct CreateHistorial<'a> {
    pub solicitud_id: DbId,
    pub user_id: DbId,
    pub estado_anterior: Option<&'a str>,
    pub nuevo_estado: &'a str,
    pub observacion: Option<&'a str>,
    pub cambiado_por: Option<DbId>,
}
