//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `usuarios.rol`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ASPIRANTE: &str = "aspirante";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_ASPIRANTE];
