//! Account registration and profile validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::ValidateEmail;

use crate::catalog::TipoDocumento;
use crate::validation::{FieldMap, FieldReader, Validated, ValidationReport, MSG_REQUIRED};

/// Minimum password length enforced on registration and password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (bounds hashing cost).
pub const MAX_PASSWORD_LENGTH: usize = 128;

static NUMERO_DOCUMENTO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{4,20}$").expect("valid regex"));

/// Identity fields shared by registration and profile edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerfilData {
    pub nombres: String,
    pub apellidos: String,
    pub tipo_documento: TipoDocumento,
    pub numero_documento: String,
}

/// Validated registration form. The password is still plaintext here and
/// must be hashed before it goes anywhere else.
#[derive(Debug, Clone)]
pub struct RegistroData {
    pub email: String,
    pub password: String,
    pub perfil: PerfilData,
}

/// Check a password against the portal policy: length bounds plus at least
/// one letter and one digit.
pub fn check_password_policy(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "La contraseña debe tener al menos {MIN_PASSWORD_LENGTH} caracteres"
        ));
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "La contraseña no puede superar {MAX_PASSWORD_LENGTH} caracteres"
        ));
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err("La contraseña debe contener letras y números".to_string());
    }
    Ok(())
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn read_perfil(f: &mut FieldReader<'_>) -> Option<PerfilData> {
    let nombres = f.required_str("nombres", 100);
    let apellidos = f.required_str("apellidos", 100);
    let tipo_documento = f.required_choice::<TipoDocumento>("tipo_documento");
    let numero_documento = f.required_matching(
        "numero_documento",
        20,
        &NUMERO_DOCUMENTO_RE,
        "Número de documento inválido: use de 4 a 20 letras o dígitos",
    );
    Some(PerfilData {
        nombres: nombres?,
        apellidos: apellidos?,
        tipo_documento: tipo_documento?,
        numero_documento: numero_documento?.to_uppercase(),
    })
}

/// Validate the identity fields of a profile edit.
pub fn validate_perfil(input: &FieldMap) -> Result<Validated<PerfilData>, ValidationReport> {
    let mut f = FieldReader::new(input);
    let perfil = read_perfil(&mut f);
    f.finish(|| perfil)
}

/// Validate the sign-up form.
pub fn validate_registro(input: &FieldMap) -> Result<Validated<RegistroData>, ValidationReport> {
    let mut f = FieldReader::new(input);

    let email = f.required_str("email", 254).map(|e| normalize_email(&e));
    let email = match email {
        Some(e) if e.validate_email() => Some(e),
        Some(_) => {
            f.error("email", "Correo electrónico inválido");
            None
        }
        None => None,
    };

    // Passwords are taken verbatim, never trimmed.
    let password = match input.get("password").and_then(|v| v.as_str()) {
        Some(p) if !p.is_empty() => match check_password_policy(p) {
            Ok(()) => Some(p.to_string()),
            Err(msg) => {
                f.error("password", msg);
                None
            }
        },
        _ => {
            f.error("password", MSG_REQUIRED);
            None
        }
    };

    let perfil = read_perfil(&mut f);

    f.finish(|| {
        Some(RegistroData {
            email: email?,
            password: password?,
            perfil: perfil?,
        })
    })
}
