//! Solicitud row models.

use admisiones_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `solicitudes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Solicitud {
    pub id: DbId,
    pub user_id: DbId,
    pub programa_academico: String,
    pub segunda_opcion: Option<String>,
    pub periodo_academico: String,
    pub modalidad_ingreso: String,
    pub observaciones: Option<String>,
    /// JSON object `{tipo: referencia}` with lowercase document keys.
    pub documentos: serde_json::Value,
    pub estado: String,
    pub fecha_envio: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Solicitud {
    /// Keys of the attached documents.
    pub fn documento_keys(&self) -> Vec<String> {
        self.documentos
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Result of an upsert: the stored row and whether it was freshly inserted.
#[derive(Debug, Clone, FromRow)]
pub struct SavedSolicitud {
    #[sqlx(flatten)]
    pub solicitud: Solicitud,
    pub inserted: bool,
}

/// Admin listing row: a solicitud joined with its applicant's identity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SolicitudResumen {
    pub id: DbId,
    pub user_id: DbId,
    pub email: String,
    pub nombres: String,
    pub apellidos: String,
    pub numero_documento: String,
    pub programa_academico: String,
    pub periodo_academico: String,
    pub modalidad_ingreso: String,
    pub estado: String,
    pub fecha_envio: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// Parameters of a guarded state change.
#[derive(Debug)]
pub struct TransitionSolicitud<'a> {
    pub solicitud_id: DbId,
    /// State the caller validated against; the update is skipped if the row
    /// has moved on in the meantime.
    pub from: &'a str,
    pub to: &'a str,
    pub cambiado_por: DbId,
    pub observacion: Option<&'a str>,
}
