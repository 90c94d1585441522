//! Solicitud status state machine.
//!
//! Transition rules:
//! - `BORRADOR` -> `ENVIADA` (applicant submit, requires 100% progress)
//! - `ENVIADA` -> `EN_REVISION`, `DOCUMENTOS_PENDIENTES`, or a decision (admin)
//! - `EN_REVISION` <-> `DOCUMENTOS_PENDIENTES` (admin)
//! - `EN_REVISION` / `DOCUMENTOS_PENDIENTES` -> `APROBADA`, `RECHAZADA`,
//!   `EN_LISTA_ESPERA` (admin)
//! - `EN_LISTA_ESPERA` -> `APROBADA`, `RECHAZADA` (admin)
//! - any non-terminal state -> `CANCELADA` (applicant or admin)
//!
//! `APROBADA`, `RECHAZADA` and `CANCELADA` are dead ends.

use serde::Serialize;

use crate::catalog::{catalog_enum, Catalog};
use crate::error::CoreError;

catalog_enum! {
    /// Lifecycle state of an admission request.
    EstadoSolicitud {
        Borrador => ("BORRADOR", "Borrador"),
        Enviada => ("ENVIADA", "Enviada"),
        EnRevision => ("EN_REVISION", "En revisión"),
        DocumentosPendientes => ("DOCUMENTOS_PENDIENTES", "Documentos pendientes"),
        Aprobada => ("APROBADA", "Aprobada"),
        Rechazada => ("RECHAZADA", "Rechazada"),
        EnListaEspera => ("EN_LISTA_ESPERA", "En lista de espera"),
        Cancelada => ("CANCELADA", "Cancelada"),
    }
}

/// Who is asking for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    /// The applicant who owns the solicitud.
    Aspirante,
    /// Admissions staff.
    Admin,
}

/// Progress percentage required before a draft can be submitted.
pub const SUBMIT_REQUIRED_PCT: u8 = 100;

impl EstadoSolicitud {
    /// Parse a stored or submitted state code.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        Self::parse(s).ok_or_else(|| {
            CoreError::Validation(format!(
                "Estado de solicitud inválido '{s}'. Opciones: {}",
                Self::codes()
            ))
        })
    }

    /// Terminal states accept no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Aprobada | Self::Rechazada | Self::Cancelada)
    }

    /// Whether the applicant may still edit the solicitud form.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Borrador | Self::DocumentosPendientes)
    }

    /// States reachable from `self`, regardless of actor.
    pub fn valid_transitions(&self) -> &'static [EstadoSolicitud] {
        use EstadoSolicitud::*;
        match self {
            Borrador => &[Enviada, Cancelada],
            Enviada => &[
                EnRevision,
                DocumentosPendientes,
                Aprobada,
                Rechazada,
                EnListaEspera,
                Cancelada,
            ],
            EnRevision => &[
                DocumentosPendientes,
                Aprobada,
                Rechazada,
                EnListaEspera,
                Cancelada,
            ],
            DocumentosPendientes => &[
                EnRevision,
                Aprobada,
                Rechazada,
                EnListaEspera,
                Cancelada,
            ],
            EnListaEspera => &[Aprobada, Rechazada, Cancelada],
            Aprobada | Rechazada | Cancelada => &[],
        }
    }

    /// Which actors may perform the `self` -> `next` transition.
    fn allowed_actors(&self, next: EstadoSolicitud) -> &'static [Actor] {
        match (self, next) {
            (Self::Borrador, Self::Enviada) => &[Actor::Aspirante],
            (_, Self::Cancelada) => &[Actor::Aspirante, Actor::Admin],
            _ => &[Actor::Admin],
        }
    }
}

/// Validate a requested transition.
///
/// `progress_pct` is only consulted for `BORRADOR -> ENVIADA`.
pub fn validate_transition(
    current: EstadoSolicitud,
    next: EstadoSolicitud,
    actor: Actor,
    progress_pct: u8,
) -> Result<(), CoreError> {
    if !current.valid_transitions().contains(&next) {
        return Err(CoreError::InvalidTransition {
            from: current.as_str().to_string(),
            to: next.as_str().to_string(),
        });
    }

    if !current.allowed_actors(next).contains(&actor) {
        return Err(CoreError::Forbidden(format!(
            "No tiene permisos para cambiar la solicitud de {current} a {next}"
        )));
    }

    if current == EstadoSolicitud::Borrador
        && next == EstadoSolicitud::Enviada
        && progress_pct < SUBMIT_REQUIRED_PCT
    {
        return Err(CoreError::Validation(format!(
            "La solicitud está completa en un {progress_pct}%; debe estar al 100% para enviarla"
        )));
    }

    Ok(())
}
