// school-backend/tests/integration/middleware/auth_tests.rs

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use school_backend::domain::user_model::UserClaims;
use school_backend::utils::jwt::{JwtConfig, JwtManager};
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{
    app_helper::{setup_app, token_for_role},
    request::{create_request, read_json},
};

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let (app, _app_state) = setup_app();

    let response = app
        .oneshot(create_request(
            "GET",
            "/permissions/me",
            Some("not-a-jwt"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "unauthorized");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let (app, _app_state) = setup_app();

    let foreign = JwtManager::new(JwtConfig {
        secret_key: "another-secret-key-that-is-at-least-32-chars".to_string(),
        access_token_expiry_minutes: 15,
        issuer: "school-backend".to_string(),
    })
    .unwrap();
    let token = foreign
        .generate_access_token(UserClaims {
            user_id: Uuid::new_v4(),
            username: "intruder".to_string(),
            role_name: Some("super_admin".to_string()),
        })
        .unwrap();

    let response = app
        .oneshot(create_request("GET", "/permissions/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let (app, _app_state) = setup_app();

    let request = Request::builder()
        .method("GET")
        .uri("/permissions/me")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_without_role_is_treated_as_teacher() {
    let (app, app_state) = setup_app();
    let token = token_for_role(&app_state, None);

    let response = app
        .oneshot(create_request("GET", "/permissions/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["data"]["role"], "teacher");
}
