//! Handlers for the `/info-personal` resource.

use admisiones_core::catalog::{Catalog, CatalogOption, EstadoCivil, Genero, GrupoSanguineo, TipoDocumento};
use admisiones_core::info_personal::validate_info_personal;
use admisiones_core::naming::canonicalize_keys;
use admisiones_core::validation::FieldMap;
use admisiones_db::models::info_personal::InfoPersonal;
use admisiones_db::repositories::InfoPersonalRepo;
use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{ApiResponse, Saved};
use crate::state::AppState;

/// Select options for the personal-information form.
#[derive(Debug, Serialize)]
pub struct InfoPersonalCatalogs {
    pub genero: Vec<CatalogOption>,
    pub estado_civil: Vec<CatalogOption>,
    pub grupo_sanguineo: Vec<CatalogOption>,
    pub tipo_documento: Vec<CatalogOption>,
    pub estrato: Vec<i16>,
}

/// GET /api/info-personal/get
///
/// `data` is `null` until the applicant saves the form for the first time.
pub async fn get_info_personal(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<Option<InfoPersonal>>> {
    let info = InfoPersonalRepo::find_by_usuario(&state.pool, user.user_id).await?;
    let message = if info.is_some() {
        "Información personal"
    } else {
        "Aún no ha registrado información personal"
    };
    Ok(ApiResponse::ok(message, info))
}

/// POST /api/info-personal/save
///
/// Create or replace the caller's record. Saving twice with the same payload
/// leaves exactly one row.
pub async fn save_info_personal(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<FieldMap>,
) -> AppResult<ApiResponse<Saved<InfoPersonal>>> {
    let today = Utc::now().date_naive();
    let validated = validate_info_personal(&canonicalize_keys(input), today)?;

    let record = InfoPersonalRepo::upsert(&state.pool, user.user_id, &validated.value).await?;

    tracing::info!(user_id = user.user_id, info_personal_id = record.id, "Personal info saved");
    Ok(ApiResponse::ok(
        "Información personal guardada",
        Saved {
            record,
            warnings: validated.warnings,
        },
    ))
}

/// GET /api/info-personal/catalogs
pub async fn catalogs() -> ApiResponse<InfoPersonalCatalogs> {
    ApiResponse::ok(
        "Catálogos de información personal",
        InfoPersonalCatalogs {
            genero: Genero::options(),
            estado_civil: EstadoCivil::options(),
            grupo_sanguineo: GrupoSanguineo::options(),
            tipo_documento: TipoDocumento::options(),
            estrato: (1..=6).collect(),
        },
    )
}
