//! Repository for the `solicitudes` table.
//!
//! Every write that changes `estado` also appends to `historial_estados`
//! inside the same transaction.

use admisiones_core::catalog::Catalog;
use admisiones_core::estado::EstadoSolicitud;
use admisiones_core::solicitud::SolicitudData;
use admisiones_core::types::DbId;
use sqlx::PgPool;

use crate::models::historial::CreateHistorial;
use crate::models::solicitud::{SavedSolicitud, Solicitud, SolicitudResumen, TransitionSolicitud};
use crate::repositories::HistorialRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, programa_academico, segunda_opcion, periodo_academico, \
                        modalidad_ingreso, observaciones, documentos, estado, fecha_envio, \
                        created_at, updated_at";

/// Observation recorded on the creation history entry.
pub const OBSERVACION_CREACION: &str = "Solicitud creada";

pub struct SolicitudRepo;

impl SolicitudRepo {
    /// Find the solicitud owned by a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Solicitud>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM solicitudes WHERE user_id = $1");
        sqlx::query_as::<_, Solicitud>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a solicitud by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Solicitud>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM solicitudes WHERE id = $1");
        sqlx::query_as::<_, Solicitud>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create the user's solicitud as a draft, or overwrite its form fields.
    ///
    /// The overwrite only happens while the row is in an editable state
    /// (`BORRADOR` or `DOCUMENTOS_PENDIENTES`); otherwise nothing is written
    /// and `None` is returned. A fresh insert also appends the
    /// `NULL -> BORRADOR` history entry.
    pub async fn save_draft(
        pool: &PgPool,
        user_id: DbId,
        data: &SolicitudData,
    ) -> Result<Option<SavedSolicitud>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO solicitudes
                (user_id, programa_academico, segunda_opcion, periodo_academico,
                 modalidad_ingreso, observaciones, documentos, estado)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (user_id)
             DO UPDATE SET
                programa_academico = EXCLUDED.programa_academico,
                segunda_opcion = EXCLUDED.segunda_opcion,
                periodo_academico = EXCLUDED.periodo_academico,
                modalidad_ingreso = EXCLUDED.modalidad_ingreso,
                observaciones = EXCLUDED.observaciones,
                documentos = EXCLUDED.documentos
             WHERE solicitudes.estado IN ('{borrador}', '{pendientes}')
             RETURNING {COLUMNS}, (xmax = 0) AS inserted",
            borrador = EstadoSolicitud::Borrador.as_str(),
            pendientes = EstadoSolicitud::DocumentosPendientes.as_str(),
        );
        let saved = sqlx::query_as::<_, SavedSolicitud>(&query)
            .bind(user_id)
            .bind(data.programa_academico.as_str())
            .bind(data.segunda_opcion.map(|v| v.as_str()))
            .bind(&data.periodo_academico)
            .bind(data.modalidad_ingreso.as_str())
            .bind(&data.observaciones)
            .bind(data.documentos_json())
            .bind(EstadoSolicitud::Borrador.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(saved) = saved else {
            return Ok(None);
        };

        if saved.inserted {
            HistorialRepo::create(
                &mut *tx,
                &CreateHistorial {
                    solicitud_id: saved.solicitud.id,
                    user_id,
                    estado_anterior: None,
                    nuevo_estado: EstadoSolicitud::Borrador.as_str(),
                    observacion: Some(OBSERVACION_CREACION),
                    cambiado_por: Some(user_id),
                },
            )
            .await?;
        }

        tx.commit().await?;
        Ok(Some(saved))
    }

    /// Move a solicitud from `input.from` to `input.to` and append the
    /// history entry, atomically.
    ///
    /// The update is guarded on the current state, so a concurrent change
    /// makes this return `None` instead of overwriting it. Entering
    /// `ENVIADA` stamps `fecha_envio`.
    pub async fn transition(
        pool: &PgPool,
        input: &TransitionSolicitud<'_>,
    ) -> Result<Option<Solicitud>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE solicitudes SET
                estado = $3,
                fecha_envio = CASE WHEN $3 = '{enviada}' THEN NOW() ELSE fecha_envio END
             WHERE id = $1 AND estado = $2
             RETURNING {COLUMNS}",
            enviada = EstadoSolicitud::Enviada.as_str(),
        );
        let updated = sqlx::query_as::<_, Solicitud>(&query)
            .bind(input.solicitud_id)
            .bind(input.from)
            .bind(input.to)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(solicitud) = updated else {
            tracing::debug!(
                solicitud_id = input.solicitud_id,
                from = input.from,
                to = input.to,
                "Guarded transition matched no row"
            );
            return Ok(None);
        };

        HistorialRepo::create(
            &mut *tx,
            &CreateHistorial {
                solicitud_id: solicitud.id,
                user_id: solicitud.user_id,
                estado_anterior: Some(input.from),
                nuevo_estado: input.to,
                observacion: input.observacion,
                cambiado_por: Some(input.cambiado_por),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(Some(solicitud))
    }

    /// Admin listing joined with applicant identity, most recently updated first.
    pub async fn list(
        pool: &PgPool,
        estado: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SolicitudResumen>, sqlx::Error> {
        sqlx::query_as::<_, SolicitudResumen>(
            "SELECT s.id, s.user_id, u.email, u.nombres, u.apellidos, u.numero_documento,
                    s.programa_academico, s.periodo_academico, s.modalidad_ingreso,
                    s.estado, s.fecha_envio, s.updated_at
             FROM solicitudes s
             JOIN usuarios u ON u.id = s.user_id
             WHERE ($1::text IS NULL OR s.estado = $1)
             ORDER BY s.updated_at DESC, s.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(estado)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total rows matching the same filter as [`SolicitudRepo::list`].
    pub async fn count(pool: &PgPool, estado: Option<&str>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM solicitudes WHERE ($1::text IS NULL OR estado = $1)",
        )
        .bind(estado)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
