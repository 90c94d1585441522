//! Handlers for the `/info-academica` resource.

use admisiones_core::catalog::{
    CaracterInstitucion, Catalog, CatalogOption, Jornada, TipoBachillerato,
};
use admisiones_core::info_academica::{
    validate_info_academica, MAX_GRADUATION_YEARS_AHEAD, MIN_GRADUATION_YEAR,
};
use admisiones_core::naming::canonicalize_keys;
use admisiones_core::validation::FieldMap;
use admisiones_db::models::info_academica::InfoAcademica;
use admisiones_db::repositories::InfoAcademicaRepo;
use axum::extract::State;
use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{ApiResponse, Saved};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InfoAcademicaCatalogs {
    pub tipo_bachillerato: Vec<CatalogOption>,
    pub jornada: Vec<CatalogOption>,
    pub caracter_institucion: Vec<CatalogOption>,
    /// Accepted graduation years, newest first.
    pub anio_graduacion: Vec<i64>,
}

/// GET /api/info-academica/get
pub async fn get_info_academica(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<Option<InfoAcademica>>> {
    let info = InfoAcademicaRepo::find_by_user(&state.pool, user.user_id).await?;
    let message = if info.is_some() {
        "Información académica"
    } else {
        "Aún no ha registrado información académica"
    };
    Ok(ApiResponse::ok(message, info))
}

/// POST /api/info-academica/save
///
/// A graduation year in the near future is accepted with a warning.
pub async fn save_info_academica(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<FieldMap>,
) -> AppResult<ApiResponse<Saved<InfoAcademica>>> {
    let current_year = Utc::now().year();
    let validated = validate_info_academica(&canonicalize_keys(input), current_year)?;

    let record = InfoAcademicaRepo::upsert(&state.pool, user.user_id, &validated.value).await?;

    tracing::info!(
        user_id = user.user_id,
        info_academica_id = record.id,
        warnings = validated.warnings.len(),
        "Academic info saved"
    );
    Ok(ApiResponse::ok(
        "Información académica guardada",
        Saved {
            record,
            warnings: validated.warnings,
        },
    ))
}

/// GET /api/info-academica/catalogs
pub async fn catalogs() -> ApiResponse<InfoAcademicaCatalogs> {
    let max_year = i64::from(Utc::now().year()) + MAX_GRADUATION_YEARS_AHEAD;
    ApiResponse::ok(
        "Catálogos de información académica",
        InfoAcademicaCatalogs {
            tipo_bachillerato: TipoBachillerato::options(),
            jornada: Jornada::options(),
            caracter_institucion: CaracterInstitucion::options(),
            anio_graduacion: (MIN_GRADUATION_YEAR..=max_year).rev().collect(),
        },
    )
}
