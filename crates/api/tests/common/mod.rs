//! Shared harness for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use admisiones_api::auth::jwt::JwtConfig;
use admisiones_api::auth::password::hash_password;
use admisiones_api::config::ServerConfig;
use admisiones_api::router::build_app_router;
use admisiones_api::state::AppState;
use admisiones_core::roles::ROLE_ADMIN;
use admisiones_db::models::usuario::{CreateUsuario, Usuario};
use admisiones_db::repositories::UsuarioRepo;

pub const PASSWORD: &str = "Secret123";

/// A `ServerConfig` with safe test defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        blacklist_prune_interval_secs: 3600,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            expiry_mins: 60,
        },
    }
}

/// The production router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// POST an arbitrary body, optionally with a content type and a token.
pub async fn post_raw(
    app: Router,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registration payload for an applicant.
pub fn registro(email: &str, documento: &str) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "nombres": "Alice",
        "apellidos": "Gómez",
        "tipo_documento": "CC",
        "numero_documento": documento,
    })
}

/// Register an applicant through the API and return a login token.
pub async fn register_and_login(pool: &PgPool, email: &str, documento: &str) -> String {
    let response = post_json(build_test_app(pool.clone()), "/api/auth/register", registro(email, documento)).await;
    assert_eq!(response.status(), 201);
    login(pool, email, PASSWORD).await
}

/// Log in through the API and return the token.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/login",
        json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), 200);
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Insert an admin directly and return a login token.
pub async fn create_admin(pool: &PgPool) -> (Usuario, String) {
    let admin = UsuarioRepo::create(
        pool,
        &CreateUsuario {
            email: "admin@example.com".to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            nombres: "Ana".to_string(),
            apellidos: "Admin".to_string(),
            tipo_documento: "CC".to_string(),
            numero_documento: "9000001".to_string(),
            rol: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .unwrap();
    let token = login(pool, "admin@example.com", PASSWORD).await;
    (admin, token)
}

pub fn info_personal_form() -> Value {
    json!({
        "fecha_nacimiento": "2005-04-12",
        "genero": "FEMENINO",
        "direccion": "Calle 10 # 20-30",
        "ciudad": "Bogotá",
        "departamento": "Cundinamarca",
        "telefono": "3001234567",
        "estrato": 3,
    })
}

pub fn info_academica_form() -> Value {
    json!({
        "institucion": "Colegio San José",
        "tipo_bachillerato": "ACADEMICO",
        "anio_graduacion": 2022,
        "puntaje_icfes": 350,
    })
}

pub fn solicitud_form(with_documents: bool) -> Value {
    let mut form = json!({
        "programa_academico": "INGENIERIA_SISTEMAS",
        "periodo_academico": "2026-2",
        "modalidad_ingreso": "REGULAR",
    });
    if with_documents {
        form["documentos"] = json!({
            "cedula": "uploads/cedula.pdf",
            "diploma": "uploads/diploma.pdf",
            "icfes": "uploads/icfes.pdf",
        });
    }
    form
}
