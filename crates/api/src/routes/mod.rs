pub mod auth;
pub mod health;
pub mod info_academica;
pub mod info_personal;
pub mod solicitudes;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                         login (public, alias of /auth/login)
///
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/logout                   logout
/// /auth/validate                 resolved token claims
/// /auth/me                       current user
/// /auth/profile                  update identity fields (PUT)
/// /auth/change-password          change password
///
/// /info-personal/get             fetch own record
/// /info-personal/save            validate + upsert
/// /info-personal/catalogs        select options (public)
///
/// /info-academica/get            fetch own record
/// /info-academica/save           validate + upsert
/// /info-academica/catalogs       select options (public)
///
/// /solicitudes/get               fetch own solicitud
/// /solicitudes/save              create or edit draft
/// /solicitudes/submit            BORRADOR -> ENVIADA
/// /solicitudes/cancel            -> CANCELADA
/// /solicitudes/progress          completeness checklist
/// /solicitudes/history           own transition history
/// /solicitudes/catalogs          select options (public)
/// /solicitudes/change-status     any transition (admin)
/// /solicitudes/all               paged listing (admin)
/// /solicitudes/{id}/history      history of one solicitud (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .nest("/auth", auth::router())
        .nest("/info-personal", info_personal::router())
        .nest("/info-academica", info_academica::router())
        .nest("/solicitudes", solicitudes::router())
}
