//! Route definitions for the `/solicitudes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::solicitudes;
use crate::state::AppState;

/// Routes mounted at `/solicitudes`.
///
/// ```text
/// GET  /get             -> get_solicitud
/// POST /save            -> save_solicitud
/// POST /submit          -> submit_solicitud
/// POST /cancel          -> cancel_solicitud
/// GET  /progress        -> progress
/// GET  /history         -> history
/// GET  /catalogs        -> catalogs (public)
/// POST /change-status   -> change_status (admin)
/// GET  /all             -> list_all (admin)
/// GET  /{id}/history    -> history_by_id (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", get(solicitudes::get_solicitud))
        .route("/save", post(solicitudes::save_solicitud))
        .route("/submit", post(solicitudes::submit_solicitud))
        .route("/cancel", post(solicitudes::cancel_solicitud))
        .route("/progress", get(solicitudes::progress))
        .route("/history", get(solicitudes::history))
        .route("/catalogs", get(solicitudes::catalogs))
        .route("/change-status", post(solicitudes::change_status))
        .route("/all", get(solicitudes::list_all))
        .route("/{id}/history", get(solicitudes::history_by_id))
}
