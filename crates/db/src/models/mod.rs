//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the table row plus the
//! insert/update DTOs its repository accepts. Form payloads that were already
//! validated in `admisiones-core` are passed to repositories as the core
//! data types directly.

pub mod historial;
pub mod info_academica;
pub mod info_personal;
pub mod solicitud;
pub mod token_blacklist;
pub mod usuario;
