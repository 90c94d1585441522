//! Admission request form.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::{Catalog, ModalidadIngreso, ProgramaAcademico, TipoDocumentoAdjunto};
use crate::validation::{FieldMap, FieldReader, Validated, ValidationReport};

/// Earliest accepted admission period year.
pub const MIN_PERIOD_YEAR: i32 = 2000;

/// How many years ahead an admission period may be requested.
pub const MAX_PERIOD_YEARS_AHEAD: i32 = 2;

/// Maximum length of a stored document reference (path or URL).
pub const MAX_DOCUMENT_REF_LENGTH: usize = 500;

static PERIODO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-([12])$").expect("valid regex"));

/// Validated solicitud form, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolicitudData {
    pub programa_academico: ProgramaAcademico,
    pub segunda_opcion: Option<ProgramaAcademico>,
    pub periodo_academico: String,
    pub modalidad_ingreso: ModalidadIngreso,
    pub observaciones: Option<String>,
    /// Attached documents keyed by lowercase document code.
    pub documentos: BTreeMap<String, String>,
}

impl SolicitudData {
    /// The `documentos` map as a JSON object for JSONB storage.
    pub fn documentos_json(&self) -> Value {
        Value::Object(
            self.documentos
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

/// Validate the solicitud form.
pub fn validate_solicitud(
    input: &FieldMap,
    current_year: i32,
) -> Result<Validated<SolicitudData>, ValidationReport> {
    let mut f = FieldReader::new(input);

    let programa_academico = f.required_choice::<ProgramaAcademico>("programa_academico");
    let segunda_opcion = f.optional_choice::<ProgramaAcademico>("segunda_opcion");
    if segunda_opcion.is_some() && segunda_opcion == programa_academico {
        f.error(
            "segunda_opcion",
            "La segunda opción debe ser un programa distinto al principal",
        );
    }

    let periodo_academico = f.required_matching(
        "periodo_academico",
        6,
        &PERIODO_RE,
        "Periodo inválido, use el formato AAAA-1 o AAAA-2",
    );
    if let Some(periodo) = &periodo_academico {
        let year = periodo_year(periodo);
        let max_year = current_year + MAX_PERIOD_YEARS_AHEAD;
        if !(MIN_PERIOD_YEAR..=max_year).contains(&year) {
            f.error(
                "periodo_academico",
                format!("El año del periodo debe estar entre {MIN_PERIOD_YEAR} y {max_year}"),
            );
        }
    }

    let modalidad_ingreso = f.required_choice::<ModalidadIngreso>("modalidad_ingreso");
    let observaciones = f.optional_str("observaciones", 1000);
    let documentos = read_documentos(&mut f);

    f.finish(|| {
        Some(SolicitudData {
            programa_academico: programa_academico?,
            segunda_opcion,
            periodo_academico: periodo_academico?,
            modalidad_ingreso: modalidad_ingreso?,
            observaciones,
            documentos,
        })
    })
}

/// The next `count` admission periods starting with the one containing `today`
/// (`AAAA-1` for January to June, `AAAA-2` for July to December).
pub fn upcoming_periods(today: NaiveDate, count: usize) -> Vec<String> {
    let mut year = today.year();
    let mut semester = if today.month() <= 6 { 1 } else { 2 };
    let mut periods = Vec::with_capacity(count);
    for _ in 0..count {
        periods.push(format!("{year}-{semester}"));
        if semester == 1 {
            semester = 2;
        } else {
            semester = 1;
            year += 1;
        }
    }
    periods
}

fn periodo_year(periodo: &str) -> i32 {
    PERIODO_RE
        .captures(periodo)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Read the optional `documentos` object. Keys must be known document codes
/// (any case); values are non-empty references.
fn read_documentos(f: &mut FieldReader<'_>) -> BTreeMap<String, String> {
    let mut documentos = BTreeMap::new();
    let Some(raw) = f.raw("documentos") else {
        return documentos;
    };
    let Some(object) = raw.as_object() else {
        f.error("documentos", "Debe ser un objeto {tipo: referencia}");
        return documentos;
    };

    for (key, value) in object {
        let Some(tipo) = TipoDocumentoAdjunto::parse(key) else {
            f.error(
                "documentos",
                format!(
                    "Tipo de documento desconocido '{key}'. Opciones: {}",
                    TipoDocumentoAdjunto::codes()
                ),
            );
            continue;
        };
        match value.as_str().map(str::trim) {
            Some(reference)
                if !reference.is_empty()
                    && reference.chars().count() <= MAX_DOCUMENT_REF_LENGTH =>
            {
                documentos.insert(tipo.key(), reference.to_string());
            }
            Some(reference) if reference.is_empty() => {}
            _ => f.error(
                "documentos",
                format!("Referencia inválida para el documento '{key}'"),
            ),
        }
    }
    documentos
}
