use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    admisiones_db::health_check(&pool).await.unwrap();

    let tables = [
        "usuarios",
        "info_personal",
        "info_academica",
        "solicitudes",
        "historial_estados",
        "token_blacklist",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Every owner column that backs an upsert must carry a `uq_` constraint.
#[sqlx::test(migrations = "./migrations")]
async fn test_upsert_keys_are_unique_constraints(pool: PgPool) {
    let expected = [
        "uq_usuarios_email",
        "uq_usuarios_documento",
        "uq_info_personal_usuario",
        "uq_info_academica_user",
        "uq_solicitudes_user",
        "uq_token_blacklist_hash",
    ];
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text FROM pg_constraint WHERE contype = 'u' ORDER BY conname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    let names: Vec<&str> = rows.iter().map(|(n,)| n.as_str()).collect();

    for name in expected {
        assert!(names.contains(&name), "missing unique constraint {name}");
    }
}

/// No character varying columns should exist; TEXT is preferred.
#[sqlx::test(migrations = "./migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::text, column_name::text
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "varchar columns found: {rows:?}");
}
