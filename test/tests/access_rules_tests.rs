//! Users view-set tests.
//!
//! Each endpoint is called as the fixture users (admin, student, teacher,
//! staff) and anonymously, against the rules in `actix_guard_test::rules`.


use actix_web::http::StatusCode;
use serde_json::json;

use actix_guard_test::rules::user_access_guard;
use common::{create_test_app, json, request, status};

// =============================================================================
// List Tests
// =============================================================================

#[actix_web::test]
async fn test_list_with_admin() {
    let app = create_test_app(user_access_guard()).await;

    let (code, body) = json(&app, request("GET", "/users", Some("admin"))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(4));
}

#[actix_web::test]
async fn test_list_with_student() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users", Some("student"))).await;
    assert_eq!(code, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_list_with_teacher() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users", Some("teacher"))).await;
    assert_eq!(code, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_list_with_staff_outside_admin_group() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users", Some("staff"))).await;
    assert_eq!(code, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_list_anonymous() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users", None)).await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_unknown_user_header_is_anonymous() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users", Some("mallory"))).await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Retrieve Tests
// =============================================================================

#[actix_web::test]
async fn test_retrieve_admin_with_admin_account() {
    let app = create_test_app(user_access_guard()).await;

    let (code, body) = json(&app, request("GET", "/users/admin", Some("admin"))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["username"], "admin");
}

#[actix_web::test]
async fn test_retrieve_student_with_student_account() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users/student", Some("student"))).await;
    assert_eq!(code, StatusCode::OK);
}

#[actix_web::test]
async fn test_retrieve_teacher_with_teacher_account() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users/teacher", Some("teacher"))).await;
    assert_eq!(code, StatusCode::OK);
}

#[actix_web::test]
async fn test_retrieve_teacher_with_student_account() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users/teacher", Some("student"))).await;
    assert_eq!(code, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_retrieve_student_with_teacher_account() {
    let app = create_test_app(user_access_guard()).await;

    let (code, body) = json(&app, request("GET", "/users/student", Some("teacher"))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["groups"], json!(["student"]));
}

#[actix_web::test]
async fn test_retrieve_any_user_with_admin_account() {
    let app = create_test_app(user_access_guard()).await;

    for name in ["student", "teacher", "staff"] {
        let code = status(&app, request("GET", &format!("/users/{}", name), Some("admin"))).await;
        assert_eq!(code, StatusCode::OK, "admin retrieving {}", name);
    }
}

#[actix_web::test]
async fn test_retrieve_anonymous() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users/student", None)).await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_retrieve_missing_user() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("GET", "/users/nobody", Some("admin"))).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

// =============================================================================
// Update Tests
// =============================================================================

#[actix_web::test]
async fn test_update_own_account() {
    let app = create_test_app(user_access_guard()).await;

    let req = request("PUT", "/users/student", Some("student"))
        .set_json(json!({"full_name": "Sam Student"}));
    let (code, body) = json(&app, req).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["full_name"], "Sam Student");
}

#[actix_web::test]
async fn test_update_other_account_forbidden() {
    let app = create_test_app(user_access_guard()).await;

    let req = request("PUT", "/users/teacher", Some("student"))
        .set_json(json!({"full_name": "Not Mine"}));
    assert_eq!(status(&app, req).await, StatusCode::FORBIDDEN);

    // Unchanged
    let (_, body) = json(&app, request("GET", "/users/teacher", Some("teacher"))).await;
    assert_eq!(body["full_name"], "");
}

#[actix_web::test]
async fn test_update_as_admin_and_staff() {
    let app = create_test_app(user_access_guard()).await;

    for user in ["admin", "staff"] {
        let req = request("PUT", "/users/student", Some(user))
            .set_json(json!({"full_name": format!("set by {}", user)}));
        assert_eq!(status(&app, req).await, StatusCode::OK, "{} updating student", user);
    }
}

#[actix_web::test]
async fn test_update_anonymous() {
    let app = create_test_app(user_access_guard()).await;

    let req = request("PUT", "/users/student", None).set_json(json!({"full_name": "x"}));
    assert_eq!(status(&app, req).await, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_update_checks_access_before_body() {
    let app = create_test_app(user_access_guard()).await;

    // Anonymous, no body
    let code = status(&app, request("PUT", "/users/student", None)).await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);

    // Anonymous, body of the wrong shape
    let req = request("PUT", "/users/student", None).set_json(json!({"nope": 1}));
    assert_eq!(status(&app, req).await, StatusCode::UNAUTHORIZED);

    // Authenticated, other account, unparsable body
    let req = request("PATCH", "/users/teacher", Some("student")).set_payload("not json");
    assert_eq!(status(&app, req).await, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_update_own_account_with_bad_body() {
    let app = create_test_app(user_access_guard()).await;

    let req = request("PUT", "/users/student", Some("student")).set_json(json!({"nope": 1}));
    assert_eq!(status(&app, req).await, StatusCode::BAD_REQUEST);

    let code = status(&app, request("PATCH", "/users/student", Some("student"))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_partial_update_own_account() {
    let app = create_test_app(user_access_guard()).await;

    let req = request("PATCH", "/users/teacher", Some("teacher")).set_json(json!({}));
    let (code, body) = json(&app, req).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["full_name"], "");

    let req = request("PATCH", "/users/teacher", Some("teacher"))
        .set_json(json!({"full_name": "Tess Teacher"}));
    let (code, body) = json(&app, req).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["full_name"], "Tess Teacher");
}

#[actix_web::test]
async fn test_partial_update_teacher_on_student_forbidden() {
    let app = create_test_app(user_access_guard()).await;

    // Teachers may look at students but not edit them.
    let req = request("PATCH", "/users/student", Some("teacher"))
        .set_json(json!({"full_name": "x"}));
    assert_eq!(status(&app, req).await, StatusCode::FORBIDDEN);
}

// =============================================================================
// Destroy Tests
// =============================================================================

#[actix_web::test]
async fn test_delete_student_own_account() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("DELETE", "/users/student", Some("student"))).await;
    assert_eq!(code, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_delete_as_admin() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("DELETE", "/users/student", Some("admin"))).await;
    assert_eq!(code, StatusCode::NO_CONTENT);

    let code = status(&app, request("GET", "/users/student", Some("admin"))).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_anonymous() {
    let app = create_test_app(user_access_guard()).await;

    let code = status(&app, request("DELETE", "/users/student", None)).await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);
}
