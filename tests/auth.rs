mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use common::{error_code, get, post_json, send, setup};

#[actix_web::test]
async fn register_token_carries_the_stored_user() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/register",
            None,
            json!({
                "name": "Ana Torres",
                "email": "Ana@Example.com",
                "password": "secret123",
                "role": "teacher"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user"].get("passwordHash").is_none());
    assert_eq!(body["user"]["email"], "ana@example.com");

    let token = body["token"].as_str().unwrap();
    let claims = tc.ctx.jwt.verify_token(token).unwrap();
    assert_eq!(claims.id, body["user"]["id"].as_str().unwrap());
    assert_eq!(claims.name, "Ana Torres");
    assert_eq!(claims.email, "ana@example.com");
    assert_eq!(claims.role, "teacher");

    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/login",
            None,
            json!({ "email": "ana@example.com", "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    let (status, me) = send(&app, get("/api/auth/me", body["token"].as_str())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["role"], "teacher");
}

#[actix_web::test]
async fn bad_credentials_never_issue_a_token() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;
    common::register(&app, "Luis", "luis@example.com", "student").await;

    for (email, password) in [
        ("luis@example.com", "wrong-password"),
        ("nobody@example.com", "secret123"),
    ] {
        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "INVALID_CREDENTIALS");
        assert!(body.get("token").is_none());
    }
}

#[actix_web::test]
async fn register_validation_errors() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let cases = [
        (
            json!({ "name": "A", "email": "a@example.com", "password": "secret123" }),
            "MISSING_FIELDS",
        ),
        (
            json!({ "name": "A", "email": "a@example.com", "password": "secret123", "role": "admin" }),
            "INVALID_ROLE",
        ),
        (
            json!({ "name": "A", "email": "not-an-email", "password": "secret123", "role": "student" }),
            "INVALID_EMAIL",
        ),
    ];
    for (payload, code) in cases {
        let (status, body) = send(&app, post_json("/api/auth/register", None, payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), code);
    }

    common::register(&app, "A", "a@example.com", "student").await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/register",
            None,
            json!({ "name": "B", "email": "A@example.com", "password": "other123", "role": "teacher" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "USER_EXISTS");
}

#[actix_web::test]
async fn gate_rejects_missing_and_forged_tokens() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (status, body) = send(&app, get("/api/classes", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHORIZED");

    let (status, body) = send(&app, get("/api/classes", Some("not.a.jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "INVALID_TOKEN");

    let (status, body) = send(&app, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
