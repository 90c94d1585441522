//! Route definitions for the `/info-personal` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::info_personal;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", get(info_personal::get_info_personal))
        .route("/save", post(info_personal::save_info_personal))
        .route("/catalogs", get(info_personal::catalogs))
}
