//! Repository for the `info_academica` table.

use admisiones_core::catalog::Catalog;
use admisiones_core::info_academica::InfoAcademicaData;
use admisiones_core::types::DbId;
use sqlx::PgPool;

use crate::models::info_academica::InfoAcademica;

const COLUMNS: &str = "id, user_id, institucion, ciudad_institucion, tipo_bachillerato, jornada, \
                        caracter_institucion, anio_graduacion, titulo_obtenido, promedio_academico, \
                        puntaje_icfes, codigo_icfes, posicion_curso, total_estudiantes, \
                        created_at, updated_at";

pub struct InfoAcademicaRepo;

impl InfoAcademicaRepo {
    /// Find the academic record of a user, if any.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<InfoAcademica>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM info_academica WHERE user_id = $1");
        sqlx::query_as::<_, InfoAcademica>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or fully replace the academic record of a user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        data: &InfoAcademicaData,
    ) -> Result<InfoAcademica, sqlx::Error> {
        let query = format!(
            "INSERT INTO info_academica
                (user_id, institucion, ciudad_institucion, tipo_bachillerato, jornada,
                 caracter_institucion, anio_graduacion, titulo_obtenido, promedio_academico,
                 puntaje_icfes, codigo_icfes, posicion_curso, total_estudiantes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             ON CONFLICT (user_id)
             DO UPDATE SET
                institucion = EXCLUDED.institucion,
                ciudad_institucion = EXCLUDED.ciudad_institucion,
                tipo_bachillerato = EXCLUDED.tipo_bachillerato,
                jornada = EXCLUDED.jornada,
                caracter_institucion = EXCLUDED.caracter_institucion,
                anio_graduacion = EXCLUDED.anio_graduacion,
                titulo_obtenido = EXCLUDED.titulo_obtenido,
                promedio_academico = EXCLUDED.promedio_academico,
                puntaje_icfes = EXCLUDED.puntaje_icfes,
                codigo_icfes = EXCLUDED.codigo_icfes,
                posicion_curso = EXCLUDED.posicion_curso,
                total_estudiantes = EXCLUDED.total_estudiantes
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InfoAcademica>(&query)
            .bind(user_id)
            .bind(&data.institucion)
            .bind(&data.ciudad_institucion)
            .bind(data.tipo_bachillerato.as_str())
            .bind(data.jornada.map(|v| v.as_str()))
            .bind(data.caracter_institucion.map(|v| v.as_str()))
            .bind(data.anio_graduacion)
            .bind(&data.titulo_obtenido)
            .bind(data.promedio_academico)
            .bind(data.puntaje_icfes)
            .bind(&data.codigo_icfes)
            .bind(data.posicion_curso)
            .bind(data.total_estudiantes)
            .fetch_one(pool)
            .await
    }
}
