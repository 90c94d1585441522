//! Typed field extraction with violation recording.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use super::report::{Validated, ValidationReport};
use super::MSG_REQUIRED;
use crate::catalog::Catalog;

/// Canonical (snake_case) form input.
pub type FieldMap = serde_json::Map<String, Value>;

/// Reads typed values out of a [`FieldMap`], recording every violation.
///
/// `null`, missing keys and blank strings are all treated as "absent".
/// Numeric fields accept JSON numbers or numeric strings.
pub struct FieldReader<'a> {
    input: &'a FieldMap,
    report: ValidationReport,
}

impl<'a> FieldReader<'a> {
    pub fn new(input: &'a FieldMap) -> Self {
        Self {
            input,
            report: ValidationReport::new(),
        }
    }

    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.report.error(field, message);
    }

    pub fn warn(&mut self, field: &str, message: impl Into<String>) {
        self.report.warn(field, message);
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.report.has_error(field)
    }

    /// The raw value of a field, or `None` when absent or blank.
    pub fn raw(&self, field: &str) -> Option<&'a Value> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(v) => Some(v),
        }
    }

    // -- strings ------------------------------------------------------------

    pub fn required_str(&mut self, field: &str, max_len: usize) -> Option<String> {
        let value = self.optional_str(field, max_len);
        if value.is_none() && !self.has_error(field) {
            self.error(field, MSG_REQUIRED);
        }
        value
    }

    pub fn optional_str(&mut self, field: &str, max_len: usize) -> Option<String> {
        let text = match self.raw(field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => {
                self.error(field, "Debe ser un texto");
                return None;
            }
        };
        if text.chars().count() > max_len {
            self.error(field, format!("No puede superar {max_len} caracteres"));
            return None;
        }
        Some(text)
    }

    /// Like [`Self::required_str`] but the value must also match `pattern`.
    pub fn required_matching(
        &mut self,
        field: &str,
        max_len: usize,
        pattern: &Regex,
        message: &str,
    ) -> Option<String> {
        let value = self.required_str(field, max_len)?;
        self.check_pattern(field, value, pattern, message)
    }

    pub fn optional_matching(
        &mut self,
        field: &str,
        max_len: usize,
        pattern: &Regex,
        message: &str,
    ) -> Option<String> {
        let value = self.optional_str(field, max_len)?;
        self.check_pattern(field, value, pattern, message)
    }

    fn check_pattern(
        &mut self,
        field: &str,
        value: String,
        pattern: &Regex,
        message: &str,
    ) -> Option<String> {
        if pattern.is_match(&value) {
            Some(value)
        } else {
            self.error(field, message);
            None
        }
    }

    // -- catalogs -----------------------------------------------------------

    pub fn required_choice<T: Catalog>(&mut self, field: &str) -> Option<T> {
        let value = self.optional_choice(field);
        if value.is_none() && !self.has_error(field) {
            self.error(field, MSG_REQUIRED);
        }
        value
    }

    pub fn optional_choice<T: Catalog>(&mut self, field: &str) -> Option<T> {
        let raw = match self.raw(field)? {
            Value::String(s) => s.as_str(),
            _ => {
                self.error(field, format!("Valor inválido. Opciones: {}", T::codes()));
                return None;
            }
        };
        let parsed = T::parse(raw);
        if parsed.is_none() {
            self.error(field, format!("Valor inválido. Opciones: {}", T::codes()));
        }
        parsed
    }

    // -- numbers ------------------------------------------------------------

    pub fn required_int(&mut self, field: &str, range: RangeInclusive<i64>) -> Option<i64> {
        let value = self.optional_int(field, range);
        if value.is_none() && !self.has_error(field) {
            self.error(field, MSG_REQUIRED);
        }
        value
    }

    pub fn optional_int(&mut self, field: &str, range: RangeInclusive<i64>) -> Option<i64> {
        let parsed = match self.raw(field)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        let Some(value) = parsed else {
            self.error(field, "Debe ser un número entero");
            return None;
        };
        if !range.contains(&value) {
            self.error(
                field,
                format!("Debe estar entre {} y {}", range.start(), range.end()),
            );
            return None;
        }
        Some(value)
    }

    pub fn optional_float(&mut self, field: &str, range: RangeInclusive<f64>) -> Option<f64> {
        let parsed = match self.raw(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        };
        let Some(value) = parsed.filter(|f| f.is_finite()) else {
            self.error(field, "Debe ser un número");
            return None;
        };
        if !range.contains(&value) {
            self.error(
                field,
                format!("Debe estar entre {} y {}", range.start(), range.end()),
            );
            return None;
        }
        Some(value)
    }

    // -- dates --------------------------------------------------------------

    /// A required `YYYY-MM-DD` date.
    pub fn required_date(&mut self, field: &str) -> Option<NaiveDate> {
        let Some(raw) = self.raw(field) else {
            self.error(field, MSG_REQUIRED);
            return None;
        };
        let parsed = raw
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        if parsed.is_none() {
            self.error(field, "Fecha inválida, use el formato AAAA-MM-DD");
        }
        parsed
    }

    // -- completion ---------------------------------------------------------

    /// Finish validation.
    ///
    /// When no errors were recorded, `build` assembles the typed value from
    /// the extracted fields; every required read that returned `None` has
    /// already recorded an error, so `build` only fails on a validator bug.
    pub fn finish<T>(
        mut self,
        build: impl FnOnce() -> Option<T>,
    ) -> Result<Validated<T>, ValidationReport> {
        if !self.report.is_valid() {
            return Err(self.report);
        }
        match build() {
            Some(value) => Ok(Validated {
                value,
                warnings: self.report.warnings,
            }),
            None => {
                self.report.error("_form", "Formulario incompleto");
                Err(self.report)
            }
        }
    }
}
