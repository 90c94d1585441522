//! Repository for the append-only `historial_estados` table.

use admisiones_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::historial::{CreateHistorial, HistorialEstado};

const COLUMNS: &str = "id, solicitud_id, user_id, estado_anterior, nuevo_estado, observacion, \
                        cambiado_por, created_at";

/// Appends and reads state-change history. There is no update or delete.
pub struct HistorialRepo;

impl HistorialRepo {
    /// Append one history row.
    ///
    /// Accepts any executor so it can run inside the transaction that
    /// performs the state change.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateHistorial<'_>,
    ) -> Result<HistorialEstado, sqlx::Error> {
        let query = format!(
            "INSERT INTO historial_estados
                (solicitud_id, user_id, estado_anterior, nuevo_estado, observacion, cambiado_por)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistorialEstado>(&query)
            .bind(input.solicitud_id)
            .bind(input.user_id)
            .bind(input.estado_anterior)
            .bind(input.nuevo_estado)
            .bind(input.observacion)
            .bind(input.cambiado_por)
            .fetch_one(executor)
            .await
    }

    /// History of one solicitud, oldest first.
    pub async fn list_for_solicitud(
        pool: &PgPool,
        solicitud_id: DbId,
    ) -> Result<Vec<HistorialEstado>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM historial_estados
             WHERE solicitud_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, HistorialEstado>(&query)
            .bind(solicitud_id)
            .fetch_all(pool)
            .await
    }
}
