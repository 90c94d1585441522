//! Loads the facts the progress checklist needs and evaluates it.

use admisiones_core::progress::{evaluate_progress, ProgressReport, ProgressSnapshot};
use admisiones_core::types::DbId;
use admisiones_db::repositories::{InfoAcademicaRepo, InfoPersonalRepo, SolicitudRepo, UsuarioRepo};
use sqlx::PgPool;

/// Gather everything known about one applicant into a [`ProgressSnapshot`].
pub async fn load_snapshot(pool: &PgPool, user_id: DbId) -> Result<ProgressSnapshot, sqlx::Error> {
    let (usuario, info_personal, info_academica, solicitud) = tokio::try_join!(
        UsuarioRepo::find_by_id(pool, user_id),
        InfoPersonalRepo::find_by_usuario(pool, user_id),
        InfoAcademicaRepo::find_by_user(pool, user_id),
        SolicitudRepo::find_by_user(pool, user_id),
    )?;

    let mut snapshot = ProgressSnapshot {
        info_personal_exists: info_personal.is_some(),
        ..Default::default()
    };
    if let Some(u) = usuario {
        snapshot.nombres = Some(u.nombres);
        snapshot.apellidos = Some(u.apellidos);
        snapshot.tipo_documento = Some(u.tipo_documento);
        snapshot.numero_documento = Some(u.numero_documento);
    }
    if let Some(a) = info_academica {
        snapshot.institucion = Some(a.institucion);
        snapshot.tipo_bachillerato = Some(a.tipo_bachillerato);
        snapshot.anio_graduacion = Some(a.anio_graduacion);
    }
    if let Some(s) = solicitud {
        snapshot.solicitud_exists = true;
        snapshot.documentos = s.documento_keys();
        snapshot.programa_academico = Some(s.programa_academico);
    }
    Ok(snapshot)
}

/// Completeness of the applicant's solicitud.
pub async fn compute_progress(pool: &PgPool, user_id: DbId) -> Result<ProgressReport, sqlx::Error> {
    let snapshot = load_snapshot(pool, user_id).await?;
    Ok(evaluate_progress(&snapshot))
}
