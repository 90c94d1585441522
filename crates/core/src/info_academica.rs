//! Secondary-school record of an applicant.

use serde::Serialize;

use crate::catalog::{CaracterInstitucion, Jornada, TipoBachillerato};
use crate::validation::{FieldMap, FieldReader, Validated, ValidationReport};

/// Earliest accepted graduation year.
pub const MIN_GRADUATION_YEAR: i64 = 1950;

/// How many years ahead of the current one a graduation year may be.
pub const MAX_GRADUATION_YEARS_AHEAD: i64 = 2;

/// Upper bound of the ICFES (Saber 11) global score.
pub const MAX_PUNTAJE_ICFES: i64 = 500;

/// Upper bound of the academic average (0–5 scale).
pub const MAX_PROMEDIO: f64 = 5.0;

/// Validated academic information, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoAcademicaData {
    pub institucion: String,
    pub ciudad_institucion: Option<String>,
    pub tipo_bachillerato: TipoBachillerato,
    pub jornada: Option<Jornada>,
    pub caracter_institucion: Option<CaracterInstitucion>,
    pub anio_graduacion: i32,
    pub titulo_obtenido: Option<String>,
    pub promedio_academico: Option<f64>,
    pub puntaje_icfes: Option<i32>,
    pub codigo_icfes: Option<String>,
    pub posicion_curso: Option<i32>,
    pub total_estudiantes: Option<i32>,
}

/// Validate the academic-information form.
///
/// A graduation year after `current_year` (still within the accepted window)
/// is valid but produces a warning on `anio_graduacion`.
pub fn validate_info_academica(
    input: &FieldMap,
    current_year: i32,
) -> Result<Validated<InfoAcademicaData>, ValidationReport> {
    let mut f = FieldReader::new(input);
    let current_year = i64::from(current_year);

    let institucion = f.required_str("institucion", 200);
    let ciudad_institucion = f.optional_str("ciudad_institucion", 100);
    let tipo_bachillerato = f.required_choice::<TipoBachillerato>("tipo_bachillerato");
    let jornada = f.optional_choice::<Jornada>("jornada");
    let caracter_institucion = f.optional_choice::<CaracterInstitucion>("caracter_institucion");

    let anio_graduacion = f.required_int(
        "anio_graduacion",
        MIN_GRADUATION_YEAR..=current_year + MAX_GRADUATION_YEARS_AHEAD,
    );
    if anio_graduacion.is_some_and(|year| year > current_year) {
        f.warn(
            "anio_graduacion",
            "El año de graduación es futuro: confirme su fecha esperada de grado",
        );
    }

    let titulo_obtenido = f.optional_str("titulo_obtenido", 150);
    let promedio_academico = f.optional_float("promedio_academico", 0.0..=MAX_PROMEDIO);
    let puntaje_icfes = f.optional_int("puntaje_icfes", 0..=MAX_PUNTAJE_ICFES);
    let codigo_icfes = f.optional_str("codigo_icfes", 30);

    let posicion_curso = f.optional_int("posicion_curso", 1..=i64::from(i32::MAX));
    let total_estudiantes = f.optional_int("total_estudiantes", 1..=i64::from(i32::MAX));
    match (posicion_curso, total_estudiantes) {
        (Some(posicion), Some(total)) if posicion > total => {
            f.error(
                "posicion_curso",
                "La posición en el curso no puede ser mayor que el total de estudiantes",
            );
        }
        (Some(_), None) if !f.has_error("total_estudiantes") => {
            f.error(
                "total_estudiantes",
                "Indique el total de estudiantes cuando informa la posición en el curso",
            );
        }
        _ => {}
    }

    f.finish(|| {
        Some(InfoAcademicaData {
            institucion: institucion?,
            ciudad_institucion,
            tipo_bachillerato: tipo_bachillerato?,
            jornada,
            caracter_institucion,
            anio_graduacion: anio_graduacion? as i32,
            titulo_obtenido,
            promedio_academico,
            puntaje_icfes: puntaje_icfes.map(|p| p as i32),
            codigo_icfes,
            posicion_curso: posicion_curso.map(|p| p as i32),
            total_estudiantes: total_estudiantes.map(|t| t as i32),
        })
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    const YEAR: i32 = 2026;

    fn valid_input() -> Value {
        json!({
            "institucion": "Colegio San José",
            "tipo_bachillerato": "ACADEMICO",
            "anio_graduacion": 2024,
            "promedio_academico": "4.3",
            "puntaje_icfes": "350",
            "posicion_curso": 3,
            "total_estudiantes": 40,
        })
    }

    fn validate(value: Value) -> Result<Validated<InfoAcademicaData>, ValidationReport> {
        validate_info_academica(value.as_object().unwrap(), YEAR)
    }

    #[test]
    fn valid_form_is_coerced() {
        let validated = validate(valid_input()).unwrap();
        let data = validated.value;
        assert_eq!(data.promedio_academico, Some(4.3));
        assert_eq!(data.puntaje_icfes, Some(350));
        assert_eq!(data.tipo_bachillerato, TipoBachillerato::Academico);
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn position_above_total_is_a_field_error() {
        let mut input = valid_input();
        input["posicion_curso"] = json!(41);
        let report = validate(input).unwrap_err();
        assert!(report.has_error("posicion_curso"));
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn position_equal_to_total_is_valid() {
        let mut input = valid_input();
        input["posicion_curso"] = json!(40);
        assert!(validate(input).is_ok());
    }

    #[test]
    fn position_without_total_is_rejected() {
        let mut input = valid_input();
        input.as_object_mut().unwrap().remove("total_estudiantes");
        assert!(validate(input).unwrap_err().has_error("total_estudiantes"));
    }

    #[test]
    fn graduation_year_window() {
        let cases = [
            (1949, false),
            (1950, true),
            (YEAR, true),
            (YEAR + 1, true),
            (YEAR + 2, true),
            (YEAR + 3, false),
        ];
        for (year, ok) in cases {
            let mut input = valid_input();
            input["anio_graduacion"] = json!(year);
            assert_eq!(validate(input).is_ok(), ok, "year {year}");
        }
    }

    #[test]
    fn next_year_graduation_warns_but_passes() {
        let mut input = valid_input();
        input["anio_graduacion"] = json!(YEAR + 1);
        let validated = validate(input).unwrap();
        assert!(validated.warnings.contains_key("anio_graduacion"));
    }

    #[test]
    fn score_ranges_are_enforced() {
        let mut input = valid_input();
        input["promedio_academico"] = json!(5.1);
        input["puntaje_icfes"] = json!(501);
        let report = validate(input).unwrap_err();
        assert!(report.has_error("promedio_academico"));
        assert!(report.has_error("puntaje_icfes"));
    }

    #[test]
    fn all_violations_are_collected() {
        let report = validate(json!({
            "tipo_bachillerato": "NOCTURNO",
            "anio_graduacion": "dos mil",
            "jornada": "SIEMPRE",
        }))
        .unwrap_err();
        assert!(report.has_error("institucion"));
        assert!(report.has_error("tipo_bachillerato"));
        assert!(report.has_error("anio_graduacion"));
        assert!(report.has_error("jornada"));
    }
}
