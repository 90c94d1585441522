//! Route definitions for the `/info-academica` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::info_academica;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", get(info_academica::get_info_academica))
        .route("/save", post(info_academica::save_info_academica))
        .route("/catalogs", get(info_academica::catalogs))
}
