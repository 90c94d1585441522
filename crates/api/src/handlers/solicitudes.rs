//! Handlers for the `/solicitudes` resource.
//!
//! Applicants own at most one solicitud. State changes go through
//! [`change_estado`] so every successful transition writes exactly one
//! history row.

use admisiones_core::catalog::{Catalog, CatalogOption, ModalidadIngreso, ProgramaAcademico};
use admisiones_core::error::CoreError;
use admisiones_core::estado::EstadoSolicitud;
use admisiones_core::naming::canonicalize_keys;
use admisiones_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use admisiones_core::progress::ProgressReport;
use admisiones_core::solicitud::{upcoming_periods, validate_solicitud};
use admisiones_core::types::DbId;
use admisiones_core::validation::{FieldMap, ValidationReport};
use admisiones_db::models::historial::HistorialEstado;
use admisiones_db::models::solicitud::{Solicitud, SolicitudResumen};
use admisiones_db::repositories::{HistorialRepo, SolicitudRepo};
use axum::extract::{Path, Query, State};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::progress::compute_progress;
use crate::engine::transitions::change_estado;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SolicitudListParams;
use crate::response::{ApiResponse, Page, Saved};
use crate::state::AppState;

/// Number of admission periods offered by the catalog endpoint.
const UPCOMING_PERIODS: usize = 4;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Optional body for submit and cancel.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ObservacionRequest {
    #[validate(length(max = 1000, message = "Máximo 1000 caracteres"))]
    pub observacion: Option<String>,
}

/// Request body for `POST /solicitudes/change-status`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeStatusRequest {
    #[serde(default, alias = "solicitudId")]
    #[validate(range(min = 1, message = "Este campo es obligatorio"))]
    pub solicitud_id: DbId,
    #[serde(default, alias = "estado", alias = "nuevoEstado")]
    #[validate(length(min = 1, message = "Este campo es obligatorio"))]
    pub nuevo_estado: String,
    #[validate(length(max = 1000, message = "Máximo 1000 caracteres"))]
    pub observacion: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SolicitudCatalogs {
    pub programas: Vec<CatalogOption>,
    pub modalidades: Vec<CatalogOption>,
    pub estados: Vec<CatalogOption>,
    pub periodos: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn own_solicitud(state: &AppState, user: &AuthUser) -> AppResult<Solicitud> {
    SolicitudRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Solicitud del usuario",
                id: user.user_id,
            }
            .into()
        })
}

fn observacion_of(body: Option<AppJson<ObservacionRequest>>) -> AppResult<Option<String>> {
    let body = body.map(|AppJson(b)| b).unwrap_or_default();
    body.validate().map_err(ValidationReport::from)?;
    Ok(body.observacion.filter(|o| !o.trim().is_empty()))
}

// ---------------------------------------------------------------------------
// Applicant handlers
// ---------------------------------------------------------------------------

/// GET /api/solicitudes/get
pub async fn get_solicitud(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<Option<Solicitud>>> {
    let solicitud = SolicitudRepo::find_by_user(&state.pool, user.user_id).await?;
    let message = if solicitud.is_some() {
        "Solicitud del usuario"
    } else {
        "Aún no ha creado una solicitud"
    };
    Ok(ApiResponse::ok(message, solicitud))
}

/// POST /api/solicitudes/save
///
/// Creates the draft (201) or updates it (200). Rejected with 409 once the
/// solicitud has left the editable states.
pub async fn save_solicitud(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<FieldMap>,
) -> AppResult<ApiResponse<Saved<Solicitud>>> {
    let validated = validate_solicitud(&canonicalize_keys(input), Utc::now().year())?;

    let saved = SolicitudRepo::save_draft(&state.pool, user.user_id, &validated.value)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict(
                "La solicitud ya fue enviada y no puede modificarse en su estado actual".into(),
            )
        })?;

    let body = Saved {
        record: saved.solicitud,
        warnings: validated.warnings,
    };
    if saved.inserted {
        tracing::info!(user_id = user.user_id, solicitud_id = body.record.id, "Solicitud created");
        Ok(ApiResponse::created("Solicitud creada", body))
    } else {
        tracing::info!(user_id = user.user_id, solicitud_id = body.record.id, "Solicitud updated");
        Ok(ApiResponse::ok("Solicitud actualizada", body))
    }
}

/// POST /api/solicitudes/submit
///
/// `BORRADOR -> ENVIADA`, only at 100% progress.
pub async fn submit_solicitud(
    State(state): State<AppState>,
    user: AuthUser,
    body: Option<AppJson<ObservacionRequest>>,
) -> AppResult<ApiResponse<Solicitud>> {
    let observacion = observacion_of(body)?;
    let solicitud = own_solicitud(&state, &user).await?;
    let updated = change_estado(
        &state.pool,
        &solicitud,
        EstadoSolicitud::Enviada,
        &user,
        observacion.as_deref().or(Some("Solicitud enviada por el aspirante")),
    )
    .await?;
    Ok(ApiResponse::ok("Solicitud enviada", updated))
}

/// POST /api/solicitudes/cancel
pub async fn cancel_solicitud(
    State(state): State<AppState>,
    user: AuthUser,
    body: Option<AppJson<ObservacionRequest>>,
) -> AppResult<ApiResponse<Solicitud>> {
    let observacion = observacion_of(body)?;
    let solicitud = own_solicitud(&state, &user).await?;
    let updated = change_estado(
        &state.pool,
        &solicitud,
        EstadoSolicitud::Cancelada,
        &user,
        observacion.as_deref(),
    )
    .await?;
    Ok(ApiResponse::ok("Solicitud cancelada", updated))
}

/// GET /api/solicitudes/progress
pub async fn progress(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<ProgressReport>> {
    let report = compute_progress(&state.pool, user.user_id).await?;
    Ok(ApiResponse::ok("Progreso de la solicitud", report))
}

/// GET /api/solicitudes/history
///
/// Empty list when the applicant has no solicitud yet.
pub async fn history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<Vec<HistorialEstado>>> {
    let entries = match SolicitudRepo::find_by_user(&state.pool, user.user_id).await? {
        Some(s) => HistorialRepo::list_for_solicitud(&state.pool, s.id).await?,
        None => Vec::new(),
    };
    Ok(ApiResponse::ok("Historial de la solicitud", entries))
}

/// GET /api/solicitudes/catalogs
pub async fn catalogs() -> ApiResponse<SolicitudCatalogs> {
    ApiResponse::ok(
        "Catálogos de la solicitud",
        SolicitudCatalogs {
            programas: ProgramaAcademico::options(),
            modalidades: ModalidadIngreso::options(),
            estados: EstadoSolicitud::options(),
            periodos: upcoming_periods(Utc::now().date_naive(), UPCOMING_PERIODS),
        },
    )
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// POST /api/solicitudes/change-status
pub async fn change_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<ChangeStatusRequest>,
) -> AppResult<ApiResponse<Solicitud>> {
    input.validate().map_err(ValidationReport::from)?;
    let to = EstadoSolicitud::from_str_value(&input.nuevo_estado)?;

    let solicitud = SolicitudRepo::find_by_id(&state.pool, input.solicitud_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Solicitud",
            id: input.solicitud_id,
        })?;

    let observacion = input.observacion.as_deref().filter(|o| !o.trim().is_empty());
    let updated = change_estado(&state.pool, &solicitud, to, &admin, observacion).await?;
    Ok(ApiResponse::ok(
        format!("Estado de la solicitud actualizado a {}", to.label()),
        updated,
    ))
}

/// GET /api/solicitudes/all?estado=&limit=&offset=
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<SolicitudListParams>,
) -> AppResult<ApiResponse<Page<SolicitudResumen>>> {
    let estado = params
        .estado
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(EstadoSolicitud::from_str_value)
        .transpose()?
        .map(|e| e.as_str());
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let (items, total) = tokio::try_join!(
        SolicitudRepo::list(&state.pool, estado, limit, offset),
        SolicitudRepo::count(&state.pool, estado),
    )?;

    Ok(ApiResponse::ok(
        "Listado de solicitudes",
        Page {
            items,
            total,
            limit,
            offset,
        },
    ))
}

/// GET /api/solicitudes/{id}/history
pub async fn history_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Vec<HistorialEstado>>> {
    if SolicitudRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "Solicitud",
            id,
        }
        .into());
    }
    let entries = HistorialRepo::list_for_solicitud(&state.pool, id).await?;
    Ok(ApiResponse::ok("Historial de la solicitud", entries))
}
