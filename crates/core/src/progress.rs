//! Solicitud completeness computation.
//!
//! Evaluation is done against a pre-loaded [`ProgressSnapshot`]; the caller
//! gathers the facts from the database. The resulting percentage is both a
//! UI gauge and the gate for submitting a draft.

use serde::Serialize;

use crate::catalog::DOCUMENTOS_REQUERIDOS;

/// Checklist item keys, in evaluation order.
pub const ITEM_SOLICITUD: &str = "solicitud";
pub const ITEM_PROGRAMA: &str = "programa_academico";
pub const ITEM_INFO_PERSONAL: &str = "info_personal";
pub const ITEM_INFO_ACADEMICA: &str = "info_academica";
pub const ITEM_DOCUMENTOS: &str = "documentos";

/// Facts about one applicant needed to compute progress.
#[derive(Debug, Clone, Default)]
pub struct ProgressSnapshot {
    pub solicitud_exists: bool,
    pub programa_academico: Option<String>,
    /// Identity fields from the user record.
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub tipo_documento: Option<String>,
    pub numero_documento: Option<String>,
    pub info_personal_exists: bool,
    /// Fields from the academic record, if any.
    pub institucion: Option<String>,
    pub tipo_bachillerato: Option<String>,
    pub anio_graduacion: Option<i32>,
    /// Keys present in the solicitud `documentos` map.
    pub documentos: Vec<String>,
}

/// One checklist line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressItem {
    pub clave: &'static str,
    pub completo: bool,
}

/// Completeness of an applicant's solicitud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    pub porcentaje: u8,
    pub completados: usize,
    pub total: usize,
    pub items: Vec<ProgressItem>,
    pub faltantes: Vec<&'static str>,
    /// Required documents not yet attached (lowercase keys).
    pub documentos_faltantes: Vec<String>,
}

impl ProgressReport {
    pub fn is_complete(&self) -> bool {
        self.completados == self.total
    }
}

/// Compute a percentage from total and met counts.
///
/// Returns 0 if `total` is 0.
pub fn compute_pct(total: usize, met: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (met as f64 / total as f64 * 100.0).round() as u8;
    pct.min(100)
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Evaluate the five-item checklist.
pub fn evaluate_progress(snapshot: &ProgressSnapshot) -> ProgressReport {
    let info_personal_complete = snapshot.info_personal_exists
        && present(&snapshot.nombres)
        && present(&snapshot.apellidos)
        && present(&snapshot.tipo_documento)
        && present(&snapshot.numero_documento);

    let info_academica_complete = present(&snapshot.institucion)
        && present(&snapshot.tipo_bachillerato)
        && snapshot.anio_graduacion.is_some();

    let documentos_faltantes: Vec<String> = DOCUMENTOS_REQUERIDOS
        .iter()
        .map(|d| d.key())
        .filter(|key| !snapshot.documentos.contains(key))
        .collect();

    let checks = [
        (ITEM_SOLICITUD, snapshot.solicitud_exists),
        (
            ITEM_PROGRAMA,
            snapshot.solicitud_exists && present(&snapshot.programa_academico),
        ),
        (ITEM_INFO_PERSONAL, info_personal_complete),
        (ITEM_INFO_ACADEMICA, info_academica_complete),
        (
            ITEM_DOCUMENTOS,
            snapshot.solicitud_exists && documentos_faltantes.is_empty(),
        ),
    ];

    let items: Vec<ProgressItem> = checks
        .iter()
        .map(|&(clave, completo)| ProgressItem { clave, completo })
        .collect();
    let completados = items.iter().filter(|i| i.completo).count();
    let faltantes = items
        .iter()
        .filter(|i| !i.completo)
        .map(|i| i.clave)
        .collect();

    ProgressReport {
        porcentaje: compute_pct(items.len(), completados),
        completados,
        total: items.len(),
        items,
        faltantes,
        documentos_faltantes,
    }
}
