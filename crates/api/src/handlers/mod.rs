//! Request handlers.
//!
//! Form payloads arrive as JSON objects, have their keys canonicalized to
//! snake_case once on entry, are validated by `admisiones_core`, and are then
//! persisted through `admisiones_db` repositories. Errors map to the
//! envelope via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod info_academica;
pub mod info_personal;
pub mod solicitudes;
