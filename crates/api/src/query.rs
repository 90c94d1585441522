//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /solicitudes/all` (`?estado=&limit=&offset=`).
///
/// Paging values are clamped with `admisiones_core::pagination`.
#[derive(Debug, Default, Deserialize)]
pub struct SolicitudListParams {
    pub estado: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
