//! Repository for the `info_personal` table.

use admisiones_core::catalog::Catalog;
use admisiones_core::info_personal::InfoPersonalData;
use admisiones_core::types::DbId;
use sqlx::PgPool;

use crate::models::info_personal::InfoPersonal;

const COLUMNS: &str = "id, usuario_id, fecha_nacimiento, genero, estado_civil, grupo_sanguineo, \
                        direccion, ciudad, departamento, telefono, telefono_alternativo, estrato, \
                        nacionalidad, lugar_nacimiento, eps, created_at, updated_at";

pub struct InfoPersonalRepo;

impl InfoPersonalRepo {
    /// Find the personal record of a user, if any.
    pub async fn find_by_usuario(
        pool: &PgPool,
        usuario_id: DbId,
    ) -> Result<Option<InfoPersonal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM info_personal WHERE usuario_id = $1");
        sqlx::query_as::<_, InfoPersonal>(&query)
            .bind(usuario_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or fully replace the personal record of a user.
    ///
    /// Keyed by `uq_info_personal_usuario`, so concurrent saves for the same
    /// user still leave exactly one row.
    pub async fn upsert(
        pool: &PgPool,
        usuario_id: DbId,
        data: &InfoPersonalData,
    ) -> Result<InfoPersonal, sqlx::Error> {
        let query = format!(
            "INSERT INTO info_personal
                (usuario_id, fecha_nacimiento, genero, estado_civil, grupo_sanguineo,
                 direccion, ciudad, departamento, telefono, telefono_alternativo,
                 estrato, nacionalidad, lugar_nacimiento, eps)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             ON CONFLICT (usuario_id)
             DO UPDATE SET
                fecha_nacimiento = EXCLUDED.fecha_nacimiento,
                genero = EXCLUDED.genero,
                estado_civil = EXCLUDED.estado_civil,
                grupo_sanguineo = EXCLUDED.grupo_sanguineo,
                direccion = EXCLUDED.direccion,
                ciudad = EXCLUDED.ciudad,
                departamento = EXCLUDED.departamento,
                telefono = EXCLUDED.telefono,
                telefono_alternativo = EXCLUDED.telefono_alternativo,
                estrato = EXCLUDED.estrato,
                nacionalidad = EXCLUDED.nacionalidad,
                lugar_nacimiento = EXCLUDED.lugar_nacimiento,
                eps = EXCLUDED.eps
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InfoPersonal>(&query)
            .bind(usuario_id)
            .bind(data.fecha_nacimiento)
            .bind(data.genero.as_str())
            .bind(data.estado_civil.map(|v| v.as_str()))
            .bind(data.grupo_sanguineo.map(|v| v.as_str()))
            .bind(&data.direccion)
            .bind(&data.ciudad)
            .bind(&data.departamento)
            .bind(&data.telefono)
            .bind(&data.telefono_alternativo)
            .bind(data.estrato)
            .bind(&data.nacionalidad)
            .bind(&data.lugar_nacimiento)
            .bind(&data.eps)
            .fetch_one(pool)
            .await
    }
}
