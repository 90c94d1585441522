use admisiones_core::error::CoreError;
use admisiones_core::validation::ValidationReport;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the error envelope:
/// `{ success: false, message, error, code, timestamp, errors?, warnings? }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `admisiones_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationReport> for AppError {
    fn from(report: ValidationReport) -> Self {
        AppError::Core(CoreError::InvalidFields(report))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(
            status = %rejection.status(),
            error = %rejection.body_text(),
            "Rejected JSON body"
        );
        AppError::BadRequest(format!(
            "Cuerpo de la petición inválido: {}",
            rejection.body_text()
        ))
    }
}

/// Everything needed to render one error response.
struct ErrorParts {
    status: StatusCode,
    kind: &'static str,
    message: String,
    report: Option<ValidationReport>,
}

impl ErrorParts {
    fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
            report: None,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Ocurrió un error interno",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let parts = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => ErrorParts::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} con id {id} no encontrado"),
                ),
                CoreError::Validation(msg) => {
                    ErrorParts::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
                }
                CoreError::InvalidFields(report) => ErrorParts {
                    report: Some(report),
                    ..ErrorParts::new(
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        "Los datos enviados contienen errores",
                    )
                },
                CoreError::Conflict(msg) => ErrorParts::new(StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::InvalidTransition { from, to } => ErrorParts::new(
                    StatusCode::CONFLICT,
                    "INVALID_TRANSITION",
                    format!("No se puede cambiar la solicitud de {from} a {to}"),
                ),
                CoreError::Unauthorized(msg) => {
                    ErrorParts::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
                }
                CoreError::Forbidden(msg) => {
                    ErrorParts::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    ErrorParts::internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                ErrorParts::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorParts::internal()
            }
        };

        let mut body = json!({
            "success": false,
            "message": parts.message,
            "error": parts.kind,
            "code": parts.status.as_u16(),
            "timestamp": Utc::now(),
        });
        if let Some(report) = parts.report {
            body["errors"] = json!(report.errors);
            if !report.warnings.is_empty() {
                body["warnings"] = json!(report.warnings);
            }
        }

        (parts.status, axum::Json(body)).into_response()
    }
}

/// Field and message reported for a known unique constraint.
fn unique_violation_message(constraint: &str) -> (Option<&'static str>, &'static str) {
    match constraint {
        "uq_usuarios_email" => (Some("email"), "El correo electrónico ya está registrado"),
        "uq_usuarios_documento" => (
            Some("numero_documento"),
            "El número de documento ya está registrado",
        ),
        "uq_solicitudes_user" => (None, "El usuario ya tiene una solicitud registrada"),
        _ => (None, "El registro ya existe"),
    }
}

/// Classify a sqlx error into an error response.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to
///   409, with a field error when the constraint guards a form field.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    match err {
        sqlx::Error::RowNotFound => {
            ErrorParts::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Recurso no encontrado")
        }
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    let (field, message) = unique_violation_message(constraint);
                    tracing::debug!(constraint, "Unique constraint violation");
                    return ErrorParts {
                        report: field.map(|f| ValidationReport::single(f, message)),
                        ..ErrorParts::new(StatusCode::CONFLICT, "CONFLICT", message)
                    };
                }
            }
            tracing::error!(error = %db_err, "Database error");
            ErrorParts::internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorParts::internal()
        }
    }
}
