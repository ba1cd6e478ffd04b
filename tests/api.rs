// tests/api.rs
//
// Rotas testadas via router. Sem token (ou com token inválido) a requisição para antes
// do banco; os casos com token válido releem a credencial e usam `#[sqlx::test]`:
//   cargo test -- --ignored

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::ServiceExt;

use ems_backend::{
    config::AppState,
    models::auth::{User, UserRole},
    routes::build_router,
};

const SECRET: &str = "segredo-de-teste";

fn lazy_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/ems_test")
        .unwrap();
    AppState::from_parts(pool, SECRET.to_string(), "./fonts".into()).unwrap()
}

fn app() -> (Router, AppState) {
    let state = lazy_state();
    (build_router(state.clone()), state)
}

fn app_with(pool: PgPool) -> (Router, AppState) {
    let state = AppState::from_parts(pool, SECRET.to_string(), "./fonts".into()).unwrap();
    (build_router(state.clone()), state)
}

fn unsaved_user(role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: uuid::Uuid::new_v4(),
        username: role.as_str().to_string(),
        email: format!("{}@company.com", role.as_str()),
        password_hash: String::new(),
        role,
        created_at: now,
        updated_at: now,
    }
}

/// Grava a credencial e devolve um token válido para ela.
async fn token_for(state: &AppState, pool: &PgPool, role: UserRole) -> String {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, role) VALUES ($1, $2, 'x', $3) RETURNING *",
    )
    .bind(role.as_str())
    .bind(format!("{}@company.com", role.as_str()))
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();
    state.auth_service.create_token(&user).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (app, _) = app();
    for uri in ["/api/employees", "/api/departments", "/api/dashboard/summary", "/api/users/me"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::get("/api/employees")
                .header(header::AUTHORIZATION, "Bearer nao.e.um.jwt")
                .header(header::ACCEPT_LANGUAGE, "pt-BR")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Token de autenticação inválido ou ausente.");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let other = AppState::from_parts(
        PgPoolOptions::new().connect_lazy("postgres://localhost/ems_test").unwrap(),
        "outro-segredo".to_string(),
        "./fonts".into(),
    )
    .unwrap();
    let token = other.auth_service.create_token(&unsaved_user(UserRole::Admin)).unwrap();

    let (app, _) = app();
    let response = app
        .oneshot(
            Request::get("/api/employees")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn employees_cannot_mutate_the_hierarchy(pool: PgPool) {
    let (app, state) = app_with(pool.clone());
    let token = token_for(&state, &pool, UserRole::Employee).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/departments",
            Some(&token),
            json!({ "name": "Engineering" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "You need the 'admin/hr' role to perform this action.");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn policy_writes_are_admin_only(pool: PgPool) {
    let (app, state) = app_with(pool.clone());
    let token = token_for(&state, &pool, UserRole::Hr).await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/policies/tax",
            Some(&token),
            json!({ "enabled": true, "rate": 10, "exemptionLimit": 40000 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn leave_decisions_need_staff(pool: PgPool) {
    let (app, state) = app_with(pool.clone());
    let token = token_for(&state, &pool, UserRole::Employee).await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/leaves/1/status",
            Some(&token),
            json!({ "status": "approved" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn invalid_payload_is_reported_per_field(pool: PgPool) {
    let (app, state) = app_with(pool.clone());
    let token = token_for(&state, &pool, UserRole::Hr).await;

    // A validação acontece antes de qualquer acesso ao banco
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/employees",
            Some(&token),
            json!({ "name": "", "email": "sem-arroba" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "One or more fields are invalid.");
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["national_id"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn token_of_a_removed_credential_is_rejected(pool: PgPool) {
    let (app, state) = app_with(pool.clone());
    let token = token_for(&state, &pool, UserRole::Hr).await;

    let me = |token: &str| {
        Request::get("/api/users/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    };
    let response = app.clone().oneshot(me(&token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    sqlx::query("DELETE FROM users").execute(&pool).await.unwrap();

    let response = app.oneshot(me(&token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn role_comes_from_the_stored_credential(pool: PgPool) {
    let (app, state) = app_with(pool.clone());
    let token = token_for(&state, &pool, UserRole::Hr).await;

    // Rebaixada depois de emitir o token
    sqlx::query("UPDATE users SET role = 'employee'").execute(&pool).await.unwrap();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/departments",
            Some(&token),
            json!({ "name": "Engineering" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_validates_before_touching_the_database() {
    let (app, _) = app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "email": "admin", "password": "123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn openapi_document_lists_the_api() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/auth/login",
        "/api/employees",
        "/api/employees/assign/{detail_id}",
        "/api/departments/{id}",
        "/api/attendance/barcode",
        "/api/leaves/{id}/status",
        "/api/policies/tax",
        "/api/payroll/{employee_id}",
    ] {
        assert!(paths.contains_key(path), "faltando {path}");
    }
    assert!(doc["components"]["securitySchemes"]["api_jwt"].is_object());
}
