//! Personal / contact information of an applicant.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;

use crate::catalog::{EstadoCivil, Genero, GrupoSanguineo};
use crate::validation::{FieldMap, FieldReader, Validated, ValidationReport};

/// Minimum applicant age in years at the time the form is saved.
pub const MIN_AGE_YEARS: u32 = 14;

/// Oldest accepted birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid regex"));

const MSG_PHONE: &str = "Teléfono inválido: use entre 7 y 15 dígitos";

/// Validated personal information, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPersonalData {
    pub fecha_nacimiento: NaiveDate,
    pub genero: Genero,
    pub estado_civil: Option<EstadoCivil>,
    pub grupo_sanguineo: Option<GrupoSanguineo>,
    pub direccion: String,
    pub ciudad: String,
    pub departamento: String,
    pub telefono: String,
    pub telefono_alternativo: Option<String>,
    pub estrato: i16,
    pub nacionalidad: Option<String>,
    pub lugar_nacimiento: Option<String>,
    pub eps: Option<String>,
}

/// Validate the personal-information form. `today` anchors the age checks.
pub fn validate_info_personal(
    input: &FieldMap,
    today: NaiveDate,
) -> Result<Validated<InfoPersonalData>, ValidationReport> {
    let mut f = FieldReader::new(input);

    let fecha_nacimiento = f.required_date("fecha_nacimiento");
    if let Some(fecha) = fecha_nacimiento {
        if fecha > today {
            f.error("fecha_nacimiento", "La fecha de nacimiento no puede ser futura");
        } else if fecha.year() < MIN_BIRTH_YEAR {
            f.error(
                "fecha_nacimiento",
                format!("La fecha de nacimiento debe ser posterior a {MIN_BIRTH_YEAR}"),
            );
        } else if today.years_since(fecha).unwrap_or(0) < MIN_AGE_YEARS {
            f.error(
                "fecha_nacimiento",
                format!("El aspirante debe tener al menos {MIN_AGE_YEARS} años"),
            );
        }
    }

    let genero = f.required_choice::<Genero>("genero");
    let estado_civil = f.optional_choice::<EstadoCivil>("estado_civil");
    let grupo_sanguineo = f.optional_choice::<GrupoSanguineo>("grupo_sanguineo");
    let direccion = f.required_str("direccion", 200);
    let ciudad = f.required_str("ciudad", 100);
    let departamento = f.required_str("departamento", 100);
    let telefono = f.required_matching("telefono", 16, &PHONE_RE, MSG_PHONE);
    let telefono_alternativo =
        f.optional_matching("telefono_alternativo", 16, &PHONE_RE, MSG_PHONE);
    let estrato = f.required_int("estrato", 1..=6);
    let nacionalidad = f.optional_str("nacionalidad", 60);
    let lugar_nacimiento = f.optional_str("lugar_nacimiento", 100);
    let eps = f.optional_str("eps", 100);

    f.finish(|| {
        Some(InfoPersonalData {
            fecha_nacimiento: fecha_nacimiento?,
            genero: genero?,
            estado_civil,
            grupo_sanguineo,
            direccion: direccion?,
            ciudad: ciudad?,
            departamento: departamento?,
            telefono: telefono?,
            telefono_alternativo,
            estrato: estrato? as i16,
            nacionalidad,
            lugar_nacimiento,
            eps,
        })
    })
}
