//! Applies a state change to a stored solicitud.

use admisiones_core::catalog::Catalog;
use admisiones_core::error::CoreError;
use admisiones_core::estado::{validate_transition, EstadoSolicitud};
use admisiones_db::models::solicitud::{Solicitud, TransitionSolicitud};
use admisiones_db::repositories::SolicitudRepo;
use sqlx::PgPool;

use crate::engine::progress::compute_progress;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Validate and persist `solicitud -> to` on behalf of `by`.
///
/// Submitting a draft re-computes progress first. The write is guarded on
/// the state that was validated, so a concurrent change surfaces as a
/// conflict instead of being overwritten. Exactly one history row is
/// appended on success.
pub async fn change_estado(
    pool: &PgPool,
    solicitud: &Solicitud,
    to: EstadoSolicitud,
    by: &AuthUser,
    observacion: Option<&str>,
) -> AppResult<Solicitud> {
    let from = EstadoSolicitud::from_str_value(&solicitud.estado)?;

    let progress_pct = if from == EstadoSolicitud::Borrador && to == EstadoSolicitud::Enviada {
        compute_progress(pool, solicitud.user_id).await?.porcentaje
    } else {
        0
    };

    if let Err(e) = validate_transition(from, to, by.actor(), progress_pct) {
        tracing::info!(
            solicitud_id = solicitud.id,
            from = %from,
            to = %to,
            user_id = by.user_id,
            error = %e,
            "Transition rejected"
        );
        return Err(e.into());
    }

    let updated = SolicitudRepo::transition(
        pool,
        &TransitionSolicitud {
            solicitud_id: solicitud.id,
            from: from.as_str(),
            to: to.as_str(),
            cambiado_por: by.user_id,
            observacion,
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "La solicitud cambió de estado mientras se procesaba; intente de nuevo".into(),
        ))
    })?;

    tracing::info!(
        solicitud_id = updated.id,
        from = %from,
        to = %to,
        user_id = by.user_id,
        "Solicitud state changed"
    );
    Ok(updated)
}
