mod common;

use assetdesk::modules::users::model::UserRole;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, create_test_user, generate_unique_email, login_session, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_activity_feed_requires_session(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/activities")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mutation_appears_in_feed_with_actor_name(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    let admin = create_test_user(&mut tx, &admin_email, "testpass123", UserRole::Admin).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let cookies = login_session(app, &admin_email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users")
                .header("content-type", "application/json")
                .header("cookie", &cookies)
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "name": "Audited Person",
                        "email": generate_unique_email(),
                        "password": "newpass123",
                        "role": "user",
                        "designation": "Analyst"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!(
                    "/api/activities/entity/user/{}",
                    created["id"].as_str().unwrap()
                ))
                .header("cookie", &cookies)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "Created");
    assert_eq!(
        entries[0]["details"],
        "Created user Audited Person with role user"
    );
    assert_eq!(entries[0]["performed_by"], admin.id.to_string());
    // the joined name is the actor's *current* one
    assert_eq!(entries[0]["user_name"], "Test User");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_feed_is_newest_first_and_respects_limit(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    create_test_user(&mut tx, &admin_email, "testpass123", UserRole::Admin).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let cookies = login_session(app, &admin_email, "testpass123").await;

    for i in 0..3 {
        let app = setup_test_app(pool.clone()).await;
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/resources")
                .header("content-type", "application/json")
                .header("cookie", &cookies)
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "resource_type": "laptop",
                        "serial_number": format!("SN-FEED-{i}")
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    }

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/activities?limit=2")
                .header("cookie", &cookies)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    let first = chrono::DateTime::parse_from_rfc3339(entries[0]["date_performed"].as_str().unwrap())
        .unwrap();
    let second =
        chrono::DateTime::parse_from_rfc3339(entries[1]["date_performed"].as_str().unwrap())
            .unwrap();
    assert!(first >= second);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_audit_rows_survive_actor_deletion(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    create_test_user(&mut tx, &admin_email, "testpass123", UserRole::Admin).await;
    let actor_email = generate_unique_email();
    let actor = create_test_user(&mut tx, &actor_email, "testpass123", UserRole::PowerUser).await;
    tx.commit().await.unwrap();

    // the poweruser performs a mutation, then the admin deletes them
    let app = setup_test_app(pool.clone()).await;
    let actor_cookies = login_session(app, &actor_email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/resources")
                .header("content-type", "application/json")
                .header("cookie", &actor_cookies)
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "resource_type": "laptop",
                        "serial_number": "SN-ORPHAN-1"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let resource = body_json(response).await;

    let app = setup_test_app(pool.clone()).await;
    let admin_cookies = login_session(app, &admin_email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users/{}", actor.id))
                .header("cookie", &admin_cookies)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!(
                    "/api/activities/entity/resource/{}",
                    resource["id"].as_str().unwrap()
                ))
                .header("cookie", &admin_cookies)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "Created");
    // the row survives, the actor reference is severed
    assert!(entries[0]["performed_by"].is_null());
    assert!(entries[0]["user_name"].is_null());
}
