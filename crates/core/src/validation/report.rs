use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Aggregated outcome of validating one form.
///
/// Serializes as `{ "valid": bool, "errors": {..}, "warnings": {..} }`.
/// Only the first error recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: BTreeMap<String, String>,
    pub warnings: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report with a single error, for checks made outside a validator.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.error(field, message);
        report
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn warn(&mut self, field: &str, message: impl Into<String>) {
        self.warnings
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

/// Field errors produced by `#[derive(validator::Validate)]` request DTOs.
impl From<validator::ValidationErrors> for ValidationReport {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut report = Self::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Valor inválido ({})", first.code));
                report.error(&field, message);
            }
        }
        report
    }
}

/// A successfully validated value plus any warning-level messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub value: T,
    pub warnings: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_per_field_wins() {
        let mut report = ValidationReport::new();
        report.error("estrato", "first");
        report.error("estrato", "second");
        assert_eq!(report.errors["estrato"], "first");
        assert!(!report.is_valid());
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let mut report = ValidationReport::new();
        report.warn("anio_graduacion", "future");
        assert!(report.is_valid());
    }

    #[test]
    fn converts_validator_errors() {
        let mut errors = validator::ValidationErrors::new();
        let mut error = validator::ValidationError::new("length");
        error.message = Some("Demasiado corta".into());
        errors.add("new_password", error);
        errors.add("current_password", validator::ValidationError::new("required"));

        let report = ValidationReport::from(errors);
        assert_eq!(report.errors["new_password"], "Demasiado corta");
        assert_eq!(report.errors["current_password"], "Valor inválido (required)");
    }

    #[test]
    fn serializes_with_valid_flag() {
        let report = ValidationReport::single("telefono", "bad");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"]["telefono"], "bad");
        assert!(json["warnings"].as_object().unwrap().is_empty());
    }
}
