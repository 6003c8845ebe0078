mod common;

use assetdesk::modules::users::model::UserRole;
use axum::body::Body;
use axum::http::header::SET_COOKIE;
use axum::http::{Request, StatusCode};
use common::{body_json, create_test_user, generate_unique_email, login_session, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_login_sets_session_cookies(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", UserRole::User).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie_names: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split('=').next())
        .map(|v| v.to_string())
        .collect();
    assert!(cookie_names.contains(&"user_id".to_string()));
    assert!(cookie_names.contains(&"user_role".to_string()));
    assert!(cookie_names.contains(&"user_name".to_string()));

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"]["password"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_email_and_wrong_password_are_indistinguishable(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", UserRole::User).await;
    tx.commit().await.unwrap();

    let login = |email: String| {
        serde_json::to_string(&json!({
            "email": email,
            "password": "not-the-password"
        }))
        .unwrap()
    };

    let app = setup_test_app(pool.clone()).await;
    let wrong_password = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(login(email)))
                .unwrap(),
        )
        .await
        .unwrap();

    let app = setup_test_app(pool.clone()).await;
    let unknown_email = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(login(generate_unique_email())))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let body_a = wrong_password
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes();
    let body_b = unknown_email
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes();
    assert_eq!(body_a, body_b);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_session_claims(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, "testpass123", UserRole::PowerUser).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let cookies = login_session(app, &email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .header("cookie", &cookies)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["role"], "poweruser");
    assert_eq!(body["name"], "Test User");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_without_session_is_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tampered_cookie_is_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .header(
                    "cookie",
                    "user_id=00000000-0000-0000-0000-000000000001; user_role=admin; user_name=Mallory",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    // unsigned cookies fail signature verification
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_clears_cookies(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", UserRole::User).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let cookies = login_session(app, &email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header("cookie", &cookies)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let removals: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .collect();
    assert_eq!(removals.len(), 3);
    for removal in &removals {
        assert!(removal.contains("Max-Age=0"), "not a removal: {removal}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_and_logout_are_audited(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, "testpass123", UserRole::User).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let cookies = login_session(app, &email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .header("cookie", &cookies)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let actions: Vec<(String,)> = sqlx::query_as(
        "SELECT action FROM activity_log WHERE performed_by = $1 ORDER BY date_performed",
    )
    .bind(user.id)
    .fetch_all(&pool)
    .await
    .unwrap();

    let actions: Vec<&str> = actions.iter().map(|(a,)| a.as_str()).collect();
    assert_eq!(actions, vec!["Login", "Logout"]);
}
