// school-backend/tests/integration/permission/check_access_tests.rs

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::common::{
    app_helper::{setup_app, token_for_role},
    request::{create_request, read_json},
};

#[tokio::test]
async fn test_check_access_allowed_for_admin() {
    let (app, app_state) = setup_app();
    let token = token_for_role(&app_state, Some("admin"));

    let response = app
        .oneshot(create_request(
            "POST",
            "/permissions/check",
            Some(&token),
            Some(json!({ "required_role": "hoi", "permission": "schools.create" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["data"]["allowed"], true);
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["required_role"], "hoi");
    assert_eq!(body["data"]["permission"], "schools.create");
    assert_eq!(body["data"]["known_permission"], true);
}

#[tokio::test]
async fn test_check_access_requires_both_rank_and_permission() {
    let (app, app_state) = setup_app();

    // teacher は medical_records.create を持つが hoi に届かない
    let teacher = token_for_role(&app_state, Some("teacher"));
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/permissions/check",
            Some(&teacher),
            Some(json!({ "required_role": "hoi", "permission": "medical_records.create" })),
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["data"]["allowed"], false);

    // sdeo は hoi より上位だが medical_records.create を持たない
    let sdeo = token_for_role(&app_state, Some("sdeo"));
    let response = app
        .oneshot(create_request(
            "POST",
            "/permissions/check",
            Some(&sdeo),
            Some(json!({ "required_role": "hoi", "permission": "medical_records.create" })),
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["data"]["allowed"], false);
}

#[tokio::test]
async fn test_check_access_unknown_permission_is_denied() {
    let (app, app_state) = setup_app();
    let token = token_for_role(&app_state, Some("super_admin"));

    for token_text in ["foo.bar", "schools", "Schools.Create"] {
        let response = app
            .clone()
            .oneshot(create_request(
                "POST",
                "/permissions/check",
                Some(&token),
                Some(json!({ "permission": token_text })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["data"]["allowed"], false, "{} should be denied", token_text);
        assert_eq!(body["data"]["known_permission"], false);
    }
}

#[tokio::test]
async fn test_check_access_role_only_for_anonymous() {
    let (app, _app_state) = setup_app();

    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/permissions/check",
            None,
            Some(json!({ "required_role": "teacher" })),
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["data"]["allowed"], true);
    assert_eq!(body["data"]["role"], "teacher");
    assert!(body["data"].get("permission").is_none());

    let response = app
        .oneshot(create_request(
            "POST",
            "/permissions/check",
            None,
            Some(json!({ "required_role": "admin" })),
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["data"]["allowed"], false);
}

#[tokio::test]
async fn test_check_access_defaults_to_least_privileged_role() {
    let (app, app_state) = setup_app();
    let token = token_for_role(&app_state, Some("hoi"));

    let response = app
        .oneshot(create_request(
            "POST",
            "/permissions/check",
            Some(&token),
            Some(json!({ "permission": "teachers.update" })),
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["data"]["required_role"], "teacher");
    assert_eq!(body["data"]["allowed"], true);
}

#[tokio::test]
async fn test_check_access_rejects_unknown_required_role() {
    let (app, _app_state) = setup_app();

    let response = app
        .oneshot(create_request(
            "POST",
            "/permissions/check",
            None,
            Some(json!({ "required_role": "principal", "permission": "schools.read" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_access_rejects_empty_fields() {
    let (app, _app_state) = setup_app();

    let response = app
        .oneshot(create_request(
            "POST",
            "/permissions/check",
            None,
            Some(json!({ "required_role": "", "permission": "" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
