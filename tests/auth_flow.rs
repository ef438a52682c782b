//! End-to-end tests for registration, login, and role-gated admin access.
//!
//! Drives the full router the way a client would: JSON bodies in, bearer
//! tokens on protected requests, status codes and response bodies out.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use risingherb_backend::{
    app::{build_router, AppContext},
    auth::{
        seed::{seed_admins, SeedAccount},
        AccountStore, TokenService,
    },
    catalog::HerbStore,
    content::ContentStore,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@risingherb.com";
const ADMIN_PASSWORD: &str = "admin-secret";

struct TestApp {
    router: Router,
    _db: NamedTempFile,
}

fn test_app() -> TestApp {
    let db = NamedTempFile::new().unwrap();
    let path = db.path().to_str().unwrap();

    let accounts = Arc::new(AccountStore::new(path).unwrap());
    let seeded = seed_admins(
        &accounts,
        &[SeedAccount {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            name: Some("Site Admin".to_string()),
        }],
    );
    assert_eq!(seeded, 1);

    let ctx = AppContext {
        accounts,
        herbs: Arc::new(HerbStore::new(path).unwrap()),
        content: Arc::new(ContentStore::new(path).unwrap()),
        tokens: Arc::new(TokenService::new("integration-test-secret".to_string())),
    };

    TestApp {
        router: build_router(ctx),
        _db: db,
    }
}

async fn send(
    router: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(router: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn signup_then_login_roundtrip() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "a@x.com", "phone": "123", "password": "secret1" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["role"], "user");
    // The hash never leaves the server.
    assert!(body["user"].get("password_hash").is_none());

    // Immediate login with the same credentials.
    let token = login(&app.router, "a@x.com", "secret1").await;

    // The token's decoded identity matches.
    let (status, me) = send(&app.router, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "a@x.com");
    assert_eq!(me["role"], "user");

    // Wrong password is rejected.
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let app = test_app();
    let payload = json!({ "email": "dup@x.com", "phone": "123", "password": "secret1" });

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_validation_failures() {
    let app = test_app();

    let cases = [
        json!({ "email": "not-an-email", "phone": "123", "password": "secret1" }),
        json!({ "email": "a@x.com", "phone": "", "password": "secret1" }),
        json!({ "email": "a@x.com", "phone": "123", "password": "12345" }),
    ];

    for payload in cases {
        let (status, _) = send(
            &app.router,
            Method::POST,
            "/api/auth/signup",
            None,
            Some(payload.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted: {}", payload);
    }
}

#[tokio::test]
async fn invalid_credentials_carry_no_enumeration_signal() {
    let app = test_app();

    send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "known@x.com", "phone": "123", "password": "secret1" })),
    )
    .await;

    let wrong_password = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "known@x.com", "password": "wrong" })),
    )
    .await;
    let unknown_email = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "unknown@x.com", "password": "wrong" })),
    )
    .await;

    // Identical status and body for both failure causes.
    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn admin_routes_enforce_role() {
    let app = test_app();

    // No token.
    let (status, _) = send(&app.router, Method::GET, "/api/carousel/all", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token.
    let (status, _) = send(
        &app.router,
        Method::GET,
        "/api/carousel/all",
        Some("not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Valid token, insufficient role.
    send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "user@x.com", "phone": "123", "password": "secret1" })),
    )
    .await;
    let user_token = login(&app.router, "user@x.com", "secret1").await;
    let (status, _) = send(
        &app.router,
        Method::GET,
        "/api/carousel/all",
        Some(&user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Seeded admin passes the gate.
    let admin_token = login(&app.router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, _) = send(
        &app.router,
        Method::GET,
        "/api/carousel/all",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_catalog_crud_and_public_listing() {
    let app = test_app();
    let admin_token = login(&app.router, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let herb = json!({
        "name": "Tulsi",
        "category": "leaves",
        "min_price": 50.0,
        "max_price": 80.0,
        "whatsapp_number": "919876543210"
    });

    // Create requires the admin role.
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/herbs",
        None,
        Some(herb.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, created) = send(
        &app.router,
        Method::POST,
        "/api/herbs",
        Some(&admin_token),
        Some(herb),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["unit"], "100 gm");

    // Publicly listed without any token.
    let (status, listed) = send(&app.router, Method::GET, "/api/herbs?q=tulsi", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Chat link is derived from the stored number.
    let (status, chat) = send(
        &app.router,
        Method::GET,
        &format!("/api/chat/link/{}", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(chat["link"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/919876543210?text="));

    // Delete, then the public lookup 404s.
    let (status, _) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/herbs/{}", id),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app.router,
        Method::GET,
        &format!("/api/herbs/{}", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_content_defaults_and_admin_update() {
    let app = test_app();

    // Defaults served before anything is stored.
    let (status, body) = send(&app.router, Method::GET, "/api/page-content/about", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hero_title"], "About Rising Herb");

    // Unknown page type is a validation failure.
    let (status, _) = send(
        &app.router,
        Method::GET,
        "/api/page-content/landing",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Update is admin-gated.
    let update = json!({ "hero_title": "Our Story" });
    let (status, _) = send(
        &app.router,
        Method::PUT,
        "/api/page-content/about",
        None,
        Some(update.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin_token = login(&app.router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, updated) = send(
        &app.router,
        Method::PUT,
        "/api/page-content/about",
        Some(&admin_token),
        Some(update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["hero_title"], "Our Story");
    // Unspecified fields keep their defaults.
    assert_eq!(
        updated["hero_subtitle"],
        "Your trusted partner in natural wellness and herbal solutions"
    );

    let (_, fetched) = send(&app.router, Method::GET, "/api/page-content/about", None, None).await;
    assert_eq!(fetched["hero_title"], "Our Story");
}
