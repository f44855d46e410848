//! HTTP-level integration tests for the admin `/api/forms` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, contact_form_body, create_form, delete_authed, get, get_authed,
    post_json_authed, OTHER_SHOP, SHOP,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_routes_require_a_session_token(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/forms").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn forged_session_token_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let request = axum::http::Request::builder()
        .uri("/api/forms")
        .header("authorization", "Bearer not.a.jwt")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn shop_param_must_match_session(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get_authed(app, &format!("/api/forms?shop={OTHER_SHOP}"), SHOP).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_then_list_forms(pool: PgPool) {
    let app = build_test_app(pool);
    let created = create_form(app.clone(), SHOP, contact_form_body("Contact")).await;

    assert_eq!(created["title"], "Contact");
    assert_eq!(created["shop"], SHOP);
    assert_eq!(created["status"], "Active");
    assert_eq!(created["questions"].as_array().unwrap().len(), 2);

    let response = get_authed(app.clone(), &format!("/api/forms?shop={SHOP}"), SHOP).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], created["id"]);

    let other = body_json(get_authed(app, "/api/forms", OTHER_SHOP).await).await;
    assert!(other.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn shop_in_body_is_ignored(pool: PgPool) {
    let app = build_test_app(pool);
    let mut body = contact_form_body("Contact");
    body["shop"] = json!(OTHER_SHOP);

    let created = create_form(app, SHOP, body).await;
    assert_eq!(created["shop"], SHOP);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upsert_with_existing_id_updates(pool: PgPool) {
    let app = build_test_app(pool);
    let created = create_form(app.clone(), SHOP, contact_form_body("Contact")).await;

    let mut body = contact_form_body("Contact us");
    body["id"] = created["id"].clone();
    body["status"] = json!("Inactive");
    let response = post_json_authed(app.clone(), "/api/forms", SHOP, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Contact us");
    assert_eq!(updated["status"], "Inactive");

    let id = created["id"].as_str().unwrap();
    let fetched = body_json(get_authed(app, &format!("/api/forms/{id}"), SHOP).await).await;
    assert_eq!(fetched["title"], "Contact us");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_without_status_keeps_form_inactive(pool: PgPool) {
    let app = build_test_app(pool);
    let mut body = contact_form_body("Contact");
    body["status"] = json!("Inactive");
    let created = create_form(app.clone(), SHOP, body).await;
    assert_eq!(created["status"], "Inactive");

    let mut edit = contact_form_body("Contact us");
    edit["id"] = created["id"].clone();
    let response = post_json_authed(app.clone(), "/api/forms", SHOP, edit).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Contact us");
    assert_eq!(updated["status"], "Inactive");

    let id = created["id"].as_str().unwrap();
    let response = get(app, &format!("/api/public/form/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upsert_with_unknown_id_creates(pool: PgPool) {
    let app = build_test_app(pool);
    let mut body = contact_form_body("Contact");
    body["id"] = json!("draft-123");

    let response = post_json_authed(app, "/api/forms", SHOP, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_ne!(created["id"], "draft-123");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upsert_of_another_shops_form_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let created = create_form(app.clone(), SHOP, contact_form_body("Contact")).await;

    let mut body = contact_form_body("Hijacked");
    body["id"] = created["id"].clone();
    let response = post_json_authed(app.clone(), "/api/forms", OTHER_SHOP, body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Form not found or unauthorized");

    let id = created["id"].as_str().unwrap();
    let fetched = body_json(get_authed(app, &format!("/api/forms/{id}"), SHOP).await).await;
    assert_eq!(fetched["title"], "Contact");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upsert_without_title_or_questions_is_400(pool: PgPool) {
    let app = build_test_app(pool);
    for body in [
        json!({"questions": [{"id": "q1", "type": "short"}]}),
        json!({"title": "Contact", "questions": []}),
    ] {
        let response = post_json_authed(app.clone(), "/api/forms", SHOP, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing title or questions");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn string_encoded_questions_are_stored_structured(pool: PgPool) {
    let app = build_test_app(pool);
    let body = json!({
        "title": "Legacy",
        "questions": r#"[{"id":"q1","type":"short","text":"Name"}]"#,
    });

    let created = create_form(app, SHOP, body).await;
    assert_eq!(created["questions"][0]["id"], "q1");
    assert_eq!(created["questions"][0]["type"], "short");
}

// ---------------------------------------------------------------------------
// Get / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_form_of_another_shop_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let created = create_form(app.clone(), SHOP, contact_form_body("Contact")).await;
    let id = created["id"].as_str().unwrap();

    let response = get_authed(app.clone(), &format!("/api/forms/{id}"), OTHER_SHOP).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_authed(app, "/api/forms/not-a-uuid", SHOP).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_missing_form_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = delete_authed(app, "/api/forms?id=missing-id", SHOP).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Form not found or unauthorized");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_without_id_is_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = delete_authed(app, "/api/forms", SHOP).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_is_scoped_to_the_session_shop(pool: PgPool) {
    let app = build_test_app(pool);
    let created = create_form(app.clone(), SHOP, contact_form_body("Contact")).await;
    let id = created["id"].as_str().unwrap();

    let response = delete_authed(app.clone(), &format!("/api/forms?id={id}"), OTHER_SHOP).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_authed(app.clone(), &format!("/api/forms?id={id}"), SHOP).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let list = body_json(get_authed(app, "/api/forms", SHOP).await).await;
    assert!(list.as_array().unwrap().is_empty());
}
