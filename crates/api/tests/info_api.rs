//! HTTP-level integration tests for `/info-personal` and `/info-academica`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_auth, info_academica_form, info_personal_form,
    post_json_auth, register_and_login,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Info personal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn info_personal_is_null_before_first_save(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let response = get_auth(build_test_app(pool), "/api/info-personal/get", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn info_personal_save_then_get(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/info-personal/save",
        &token,
        info_personal_form(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(build_test_app(pool), "/api/info-personal/get", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["fecha_nacimiento"], "2005-04-12");
    assert_eq!(json["data"]["genero"], "FEMENINO");
    assert_eq!(json["data"]["estrato"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn saving_twice_keeps_one_row(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    for ciudad in ["Bogotá", "Medellín"] {
        let mut form = info_personal_form();
        form["ciudad"] = json!(ciudad);
        let response = post_json_auth(
            build_test_app(pool.clone()),
            "/api/info-personal/save",
            &token,
            form,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM info_personal")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let response = get_auth(build_test_app(pool), "/api/info-personal/get", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["ciudad"], "Medellín");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn camel_case_keys_are_accepted(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/info-personal/save",
        &token,
        json!({
            "fechaNacimiento": "2004-01-30",
            "genero": "masculino",
            "direccion": "Carrera 7 # 1-2",
            "ciudad": "Cali",
            "departamento": "Valle del Cauca",
            "telefono": "3109876543",
            "telefonoAlternativo": "6012345678",
            "estrato": "2",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["fecha_nacimiento"], "2004-01-30");
    assert_eq!(json["data"]["genero"], "MASCULINO");
    assert_eq!(json["data"]["telefono_alternativo"], "6012345678");
    assert_eq!(json["data"]["estrato"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_info_personal_reports_every_field(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let mut form = info_personal_form();
    form["estrato"] = json!(9);
    form["genero"] = json!("DESCONOCIDO");
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/info-personal/save",
        &token,
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
    assert!(json["errors"]["estrato"].is_string());
    assert!(json["errors"]["genero"].is_string());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM info_personal")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn info_personal_requires_auth(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/info-personal/get").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn info_personal_catalogs_are_public(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/info-personal/catalogs").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["estrato"], json!([1, 2, 3, 4, 5, 6]));
    assert_eq!(json["data"]["genero"][0]["value"], "MASCULINO");
    assert_eq!(json["data"]["tipo_documento"][0]["value"], "CC");
}

// ---------------------------------------------------------------------------
// Info academica
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn info_academica_save_then_get(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/info-academica/save",
        &token,
        info_academica_form(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].get("warnings").is_none());

    let response = get_auth(build_test_app(pool), "/api/info-academica/get", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["institucion"], "Colegio San José");
    assert_eq!(json["data"]["anio_graduacion"], 2022);
    assert_eq!(json["data"]["puntaje_icfes"], 350);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn position_above_class_size_is_rejected(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let mut form = info_academica_form();
    form["posicionCurso"] = json!(40);
    form["totalEstudiantes"] = json!(30);
    let response = post_json_auth(
        build_test_app(pool),
        "/api/info-academica/save",
        &token,
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["posicion_curso"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn info_academica_catalogs_are_public(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/info-academica/catalogs").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["tipo_bachillerato"][0]["value"], "ACADEMICO");
    let years = json["data"]["anio_graduacion"].as_array().unwrap();
    assert_eq!(years.last().unwrap(), 1950);
}
