use assetdesk::config::cors::CorsConfig;
use assetdesk::config::session::SessionConfig;
use assetdesk::modules::users::model::UserRole;
use assetdesk::router::init_router;
use assetdesk::state::AppState;
use assetdesk::utils::password::hash_password;
use axum::body::Body;
use axum::http::header::SET_COOKIE;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool.clone(),
        session_config: SessionConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Insert a user directly, bypassing the API.
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    role: UserRole,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (name, email, password, role, designation)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(&hashed)
    .bind(role)
    .bind("Tester")
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

#[allow(dead_code)]
pub struct TestResource {
    pub id: Uuid,
    pub reg_number: String,
}

#[allow(dead_code)]
pub async fn create_test_resource(
    tx: &mut Transaction<'_, Postgres>,
    resource_type: &str,
    serial_number: &str,
    assigned_user_id: Option<Uuid>,
) -> TestResource {
    let reg_number = format!("{}-REG-TEST-{}", resource_type.to_uppercase(), Uuid::new_v4());

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO resources (reg_number, resource_type, serial_number, assigned_user_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(&reg_number)
    .bind(resource_type)
    .bind(serial_number)
    .bind(assigned_user_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestResource { id, reg_number }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Log in and return a `Cookie` header value carrying the session cookies.
pub async fn login_session(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "login failed");

    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(|v| v.to_string())
        .collect();
    assert!(!cookies.is_empty(), "login set no cookies");

    cookies.join("; ")
}

#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
