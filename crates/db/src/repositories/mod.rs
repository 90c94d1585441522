//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod historial_repo;
pub mod info_academica_repo;
pub mod info_personal_repo;
pub mod solicitud_repo;
pub mod token_blacklist_repo;
pub mod usuario_repo;

pub use historial_repo::HistorialRepo;
pub use info_academica_repo::InfoAcademicaRepo;
pub use info_personal_repo::InfoPersonalRepo;
pub use solicitud_repo::SolicitudRepo;
pub use token_blacklist_repo::TokenBlacklistRepo;
pub use usuario_repo::UsuarioRepo;
