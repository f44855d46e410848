#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use formify_api::auth::session_token::{issue_session_token, ShopifyConfig};
use formify_api::config::ServerConfig;
use formify_api::router::build_app_router;
use formify_api::state::AppState;

pub const SHOP: &str = "acme.myshopify.com";
pub const OTHER_SHOP: &str = "rival.myshopify.com";
pub const APP_URL: &str = "https://forms.example.com";

fn test_shopify() -> ShopifyConfig {
    ShopifyConfig {
        api_key: "test-api-key".to_string(),
        api_secret: "test-api-secret".to_string(),
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the Shopify admin as CORS origin (matching the production default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["https://admin.shopify.com".to_string()],
        request_timeout_secs: 30,
        public_app_url: APP_URL.to_string(),
        shopify: test_shopify(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone()).unwrap();
    build_app_router(state, &config)
}

/// A valid session token for `shop`, signed with the test credentials.
pub fn session_token(shop: &str) -> String {
    issue_session_token(shop, &test_shopify(), 60).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn authed(builder: axum::http::request::Builder, shop: &str) -> axum::http::request::Builder {
    builder.header(header::AUTHORIZATION, format!("Bearer {}", session_token(shop)))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_authed(app: Router, uri: &str, shop: &str) -> Response<Body> {
    let request = authed(Request::builder().uri(uri), shop)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_authed(
    app: Router,
    uri: &str,
    shop: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = authed(Request::builder().method(Method::POST).uri(uri), shop)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    post_raw(app, uri, "application/x-www-form-urlencoded", body).await
}

pub async fn delete_authed(app: Router, uri: &str, shop: &str) -> Response<Body> {
    let request = authed(Request::builder().method(Method::DELETE).uri(uri), shop)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn options(app: Router, uri: &str, origin: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A two-question contact form body for `POST /api/forms`.
pub fn contact_form_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "questions": [
            {"id": "q1", "type": "short", "text": "Name", "required": true},
            {"id": "q2", "type": "email", "text": "Email"},
        ],
    })
}

/// Create a form through the admin API and return its JSON.
pub async fn create_form(app: Router, shop: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_authed(app, "/api/forms", shop, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
