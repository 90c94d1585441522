//! Field validation toolkit shared by the entity validators.
//!
//! Validators never fail fast: every violation is collected into a
//! [`ValidationReport`] so a form can display all errors at once.

mod fields;
mod report;

pub use fields::{FieldMap, FieldReader};
pub use report::{Validated, ValidationReport};

/// Message recorded when a required field is absent or blank.
pub const MSG_REQUIRED: &str = "Este campo es obligatorio";
