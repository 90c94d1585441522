//! Route definitions for the `/auth` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register         -> register
/// POST /login            -> login
/// POST /logout           -> logout (requires auth)
/// POST /validate         -> validate (requires auth)
/// GET  /me               -> me (requires auth)
/// PUT  /profile          -> update_profile (requires auth)
/// POST /change-password  -> change_password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/validate", post(auth::validate))
        .route("/me", get(auth::me))
        .route("/profile", put(auth::update_profile))
        .route("/change-password", post(auth::change_password))
}
