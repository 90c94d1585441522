//! HTTP-level integration tests for `/solicitudes`: drafts, progress, the
//! state machine and its history.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_admin, get, get_auth, info_academica_form,
    info_personal_form, post_auth, post_json_auth, register_and_login, solicitud_form,
};
use serde_json::{json, Value};
use sqlx::PgPool;

use admisiones_db::repositories::HistorialRepo;

/// Fill in every section so progress reaches 100%.
async fn complete_application(pool: &PgPool, token: &str) -> Value {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/info-personal/save",
        token,
        info_personal_form(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/info-academica/save",
        token,
        info_academica_form(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/save",
        token,
        solicitud_form(true),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn submitted_solicitud(pool: &PgPool) -> (String, i64) {
    let token = register_and_login(pool, "alice@example.com", "1020304050").await;
    let solicitud = complete_application(pool, &token).await;
    let response = post_auth(build_test_app(pool.clone()), "/api/solicitudes/submit", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    (token, solicitud["id"].as_i64().unwrap())
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn first_save_creates_a_draft_with_history(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/save",
        &token,
        solicitud_form(false),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["estado"], "BORRADOR");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/save",
        &token,
        solicitud_form(true),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(build_test_app(pool), "/api/solicitudes/history", &token).await;
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]["estado_anterior"].is_null());
    assert_eq!(entries[0]["nuevo_estado"], "BORRADOR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_is_empty_without_a_solicitud(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let response = get_auth(build_test_app(pool.clone()), "/api/solicitudes/history", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));

    let response = get_auth(build_test_app(pool), "/api/solicitudes/get", &token).await;
    assert!(body_json(response).await["data"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_document_type_is_rejected(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let mut form = solicitud_form(false);
    form["documentos"] = json!({ "pasado_judicial": "x.pdf" });
    let response = post_json_auth(build_test_app(pool), "/api/solicitudes/save", &token, form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["documentos"].is_string());
}

// ---------------------------------------------------------------------------
// Progress and submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn progress_counts_completed_sections(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;

    let response = get_auth(build_test_app(pool.clone()), "/api/solicitudes/progress", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["porcentaje"], 0);
    assert_eq!(json["data"]["total"], 5);

    post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/save",
        &token,
        solicitud_form(false),
    )
    .await;

    let response = get_auth(build_test_app(pool), "/api/solicitudes/progress", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["porcentaje"], 40);
    assert_eq!(
        json["data"]["documentos_faltantes"],
        json!(["cedula", "diploma", "icfes"])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_is_blocked_below_full_progress(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;
    post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/save",
        &token,
        solicitud_form(true),
    )
    .await;

    let response = post_auth(build_test_app(pool.clone()), "/api/solicitudes/submit", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = get_auth(build_test_app(pool), "/api/solicitudes/get", &token).await;
    assert_eq!(body_json(response).await["data"]["estado"], "BORRADOR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn complete_application_can_be_submitted(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;
    complete_application(&pool, &token).await;

    let response = get_auth(build_test_app(pool.clone()), "/api/solicitudes/progress", &token).await;
    assert_eq!(body_json(response).await["data"]["porcentaje"], 100);

    let response = post_auth(build_test_app(pool.clone()), "/api/solicitudes/submit", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["estado"], "ENVIADA");
    assert!(json["data"]["fecha_envio"].is_string());

    // A sent solicitud is no longer editable.
    let response = post_json_auth(
        build_test_app(pool),
        "/api/solicitudes/save",
        &token,
        solicitud_form(true),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn applicant_can_cancel(pool: PgPool) {
    let token = register_and_login(&pool, "alice@example.com", "1020304050").await;
    post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/save",
        &token,
        solicitud_form(false),
    )
    .await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/cancel",
        &token,
        json!({ "observacion": "Cambio de universidad" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["estado"], "CANCELADA");

    // Terminal: a second cancel is an invalid transition.
    let response = post_auth(build_test_app(pool), "/api/solicitudes/cancel", &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "INVALID_TRANSITION");
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_approval_writes_one_history_row(pool: PgPool) {
    let (_token, solicitud_id) = submitted_solicitud(&pool).await;
    let (admin, admin_token) = create_admin(&pool).await;
    let before = HistorialRepo::list_for_solicitud(&pool, solicitud_id)
        .await
        .unwrap()
        .len();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/change-status",
        &admin_token,
        json!({ "solicitud_id": solicitud_id, "nuevo_estado": "APROBADA", "observacion": "Cumple requisitos" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["estado"], "APROBADA");

    let history = HistorialRepo::list_for_solicitud(&pool, solicitud_id).await.unwrap();
    assert_eq!(history.len(), before + 1);
    let last = history.last().unwrap();
    assert_eq!(last.estado_anterior.as_deref(), Some("ENVIADA"));
    assert_eq!(last.nuevo_estado, "APROBADA");
    assert_eq!(last.cambiado_por, Some(admin.id));
    assert_eq!(last.observacion.as_deref(), Some("Cumple requisitos"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_status_is_admin_only(pool: PgPool) {
    let (token, solicitud_id) = submitted_solicitud(&pool).await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/solicitudes/change-status",
        &token,
        json!({ "solicitud_id": solicitud_id, "estado": "APROBADA" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn terminal_solicitud_rejects_changes(pool: PgPool) {
    let (_token, solicitud_id) = submitted_solicitud(&pool).await;
    let (_admin, admin_token) = create_admin(&pool).await;

    for (estado, expected) in [
        ("RECHAZADA", StatusCode::OK),
        ("EN_REVISION", StatusCode::CONFLICT),
    ] {
        let response = post_json_auth(
            build_test_app(pool.clone()),
            "/api/solicitudes/change-status",
            &admin_token,
            json!({ "solicitud_id": solicitud_id, "nuevo_estado": estado }),
        )
        .await;
        assert_eq!(response.status(), expected, "{estado}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_state_is_a_validation_error(pool: PgPool) {
    let (_token, solicitud_id) = submitted_solicitud(&pool).await;
    let (_admin, admin_token) = create_admin(&pool).await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/solicitudes/change-status",
        &admin_token,
        json!({ "solicitud_id": solicitud_id, "nuevo_estado": "ARCHIVADA" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_lists_and_filters_solicitudes(pool: PgPool) {
    submitted_solicitud(&pool).await;
    let draft_token = register_and_login(&pool, "bob@example.com", "2030405060").await;
    post_json_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/save",
        &draft_token,
        solicitud_form(false),
    )
    .await;
    let (_admin, admin_token) = create_admin(&pool).await;

    let response = get_auth(build_test_app(pool.clone()), "/api/solicitudes/all", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["limit"], 20);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/solicitudes/all?estado=enviada&limit=500",
        &admin_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["limit"], 100);
    assert_eq!(json["data"]["items"][0]["email"], "alice@example.com");

    let response = get_auth(build_test_app(pool), "/api/solicitudes/all", &draft_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_reads_history_by_id(pool: PgPool) {
    let (_token, solicitud_id) = submitted_solicitud(&pool).await;
    let (_admin, admin_token) = create_admin(&pool).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/solicitudes/{solicitud_id}/history"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let estados: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["nuevo_estado"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(estados, vec!["BORRADOR", "ENVIADA"]);

    let response = get_auth(build_test_app(pool), "/api/solicitudes/999999/history", &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn solicitud_catalogs_are_public(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/solicitudes/catalogs").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["estados"].as_array().unwrap().len(), 8);
    assert_eq!(json["data"]["periodos"].as_array().unwrap().len(), 4);
    assert_eq!(json["data"]["programas"][0]["value"], "INGENIERIA_SISTEMAS");
}
