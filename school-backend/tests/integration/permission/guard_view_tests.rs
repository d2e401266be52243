// school-backend/tests/integration/permission/guard_view_tests.rs

use axum::http::StatusCode;
use tower::ServiceExt;

use crate::common::{
    app_helper::{setup_app, token_for_role},
    request::{create_request, read_json},
};

#[tokio::test]
async fn test_anonymous_guards_match_teacher() {
    let (app, app_state) = setup_app();

    let anonymous = app
        .clone()
        .oneshot(create_request("GET", "/permissions/me", None, None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::OK);
    let anonymous = read_json(anonymous).await;

    let token = token_for_role(&app_state, Some("teacher"));
    let teacher = app
        .oneshot(create_request("GET", "/permissions/me", Some(&token), None))
        .await
        .unwrap();
    let teacher = read_json(teacher).await;

    assert_eq!(anonymous["success"], true);
    assert_eq!(anonymous["data"]["role"], "teacher");
    assert_eq!(anonymous["data"]["rank"], 10);
    assert_eq!(anonymous["data"], teacher["data"]);
}

#[tokio::test]
async fn test_admin_manages_schools_but_cannot_delete() {
    let (app, app_state) = setup_app();
    let token = token_for_role(&app_state, Some("admin"));

    let response = app
        .oneshot(create_request("GET", "/permissions/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let view = &read_json(response).await["data"];
    assert_eq!(view["role"], "admin");
    assert_eq!(view["is_admin"], true);
    assert_eq!(view["is_super_admin"], false);
    assert_eq!(view["can_manage_schools"], true);
    assert_eq!(view["can_delete_schools"], false);
    assert_eq!(view["can_manage_users"], true);
}

#[tokio::test]
async fn test_super_admin_has_every_guard() {
    let (app, app_state) = setup_app();
    let token = token_for_role(&app_state, Some("super_admin"));

    let response = app
        .oneshot(create_request("GET", "/permissions/me", Some(&token), None))
        .await
        .unwrap();
    let view = &read_json(response).await["data"];

    for field in [
        "is_super_admin",
        "is_admin",
        "can_view_users",
        "can_manage_users",
        "can_manage_schools",
        "can_delete_schools",
        "can_manage_teachers",
        "can_manage_medical_records",
        "can_manage_master_data",
        "can_view_reports",
        "can_export_reports",
        "can_view_district_dashboard",
    ] {
        assert_eq!(view[field], true, "{} should be true for super_admin", field);
    }
    assert_eq!(view["permissions"].as_array().unwrap().len(), 21);
}

#[tokio::test]
async fn test_unknown_role_claim_falls_back_to_teacher() {
    let (app, app_state) = setup_app();
    let token = token_for_role(&app_state, Some("principal"));

    let response = app
        .oneshot(create_request("GET", "/permissions/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let view = &read_json(response).await["data"];
    assert_eq!(view["role"], "teacher");
    assert_eq!(view["is_admin"], false);
}

#[tokio::test]
async fn test_district_roles_see_reports() {
    let (app, app_state) = setup_app();

    let deo = token_for_role(&app_state, Some("deo"));
    let response = app
        .clone()
        .oneshot(create_request("GET", "/permissions/me", Some(&deo), None))
        .await
        .unwrap();
    let view = &read_json(response).await["data"];
    assert_eq!(view["can_export_reports"], true);
    assert_eq!(view["can_view_district_dashboard"], true);

    let hoi = token_for_role(&app_state, Some("hoi"));
    let response = app
        .oneshot(create_request("GET", "/permissions/me", Some(&hoi), None))
        .await
        .unwrap();
    let view = &read_json(response).await["data"];
    assert_eq!(view["can_export_reports"], false);
    assert_eq!(view["can_view_district_dashboard"], false);
}
