//! 인증/인가 통합 테스트
//!
//! 계정 생성 → 로그인 → 보호된 라우트 / 관리자 라우트 흐름을 라우터 단위로 검증합니다.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use store_api::{
    auth::TokenIssuer,
    create_router,
    repository::{MemoryProductStore, MemoryUserStore},
    AppState, Principal,
};
use store_core::{AuthConfig, HashConfig};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret-key-0123456789";

fn app() -> Router {
    let auth = AuthConfig::new(SECRET).with_hash(HashConfig::minimal());
    let state = AppState::new(
        &auth,
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryProductStore::new()),
    )
    .unwrap();
    create_router(Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn register_and_login(app: &Router, email: &str, role: &str) -> (i64, String) {
    let (status, created) = send(
        app,
        json_request(
            "POST",
            "/user",
            None,
            json!({"name": "tester", "email": email, "password": "s3cret!", "role": role}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, token) = send(
        app,
        json_request(
            "POST",
            "/user/login",
            None,
            json!({"email": email, "password": "s3cret!"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "Bearer");

    (
        created["data"]["id"].as_i64().unwrap(),
        token["access_token"].as_str().unwrap().to_string(),
    )
}

fn keyboard() -> Value {
    json!({
        "name": "Keyboard",
        "description": "Mechanical keyboard",
        "price": "89.90",
        "quantity": 5
    })
}

#[tokio::test]
async fn test_login_then_me() {
    let app = app();
    let (id, token) = register_and_login(&app, "alice@example.com", "user").await;

    let (status, me) = send(
        &app,
        get("/protect/user/me", Some(&format!("Bearer {}", token))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["id"], id);
    assert_eq!(me["data"]["email"], "alice@example.com");
    assert!(me["data"].get("password").is_none());
}

#[tokio::test]
async fn test_me_header_failures() {
    let app = app();

    let (status, body) = send(&app, get("/protect/user/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "MISSING_CREDENTIAL");

    for header in ["Token abc", "Bearer", "Bearer ", "Bearer a b"] {
        let (status, body) = send(&app, get("/protect/user/me", Some(header))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {:?}", header);
        assert_eq!(body["code"], "MALFORMED_CREDENTIAL");
    }

    let (status, body) = send(&app, get("/protect/user/me", Some("Bearer not.a.jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = app();
    let issued = TokenIssuer::new(SECRET.as_bytes(), 1)
        .issue_at(&Principal::new(1, "admin"), 1_000)
        .unwrap();

    let (status, body) = send(
        &app,
        get(
            "/protect/user/me",
            Some(&format!("Bearer {}", issued.access_token)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid or expired token");
}

#[tokio::test]
async fn test_admin_can_manage_products() {
    let app = app();
    let (_, token) = register_and_login(&app, "admin@example.com", "admin").await;

    let (status, created) = send(
        &app,
        json_request("POST", "/admin/products", Some(&token), keyboard()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = created["data"]["id"].as_i64().unwrap();

    let (status, listed) = send(&app, get("/products", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let mut changed = keyboard();
    changed["quantity"] = json!(7);
    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/admin/products/{}", product_id),
            Some(&token),
            changed,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["quantity"], 7);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/admin/products/{}", product_id))
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&format!("/products/{}", product_id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let app = app();
    let (_, token) = register_and_login(&app, "bob@example.com", "user").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/admin/products", Some(&token), keyboard()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    // 아무것도 생성되지 않음
    let (_, listed) = send(&app, get("/products", None)).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_role_match_is_case_sensitive() {
    let app = app();
    let (_, token) = register_and_login(&app, "carol@example.com", "Admin").await;

    let (status, _) = send(
        &app,
        json_request("POST", "/admin/products", Some(&token), keyboard()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_signed_with_other_key_rejected() {
    let app = app();
    let issued = TokenIssuer::new(b"some-other-signing-key-0123456789", 60)
        .issue(&Principal::new(1, "admin"))
        .unwrap();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/admin/products",
            Some(&issued.access_token),
            keyboard(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_password_change_then_login() {
    let app = app();
    let (id, _) = register_and_login(&app, "dave@example.com", "user").await;

    let update = json!({
        "name": "dave",
        "email": "dave@example.com",
        "password": "new-plain-pass",
        "role": "user"
    });
    let (status, _) = send(
        &app,
        json_request("PUT", &format!("/user/{}", id), None, update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/user/login",
            None,
            json!({"email": "dave@example.com", "password": "new-plain-pass"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/user/login",
            None,
            json!({"email": "dave@example.com", "password": "s3cret!"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_email_conflict() {
    let app = app();
    register_and_login(&app, "erin@example.com", "user").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/user",
            None,
            json!({"name": "x", "email": "erin@example.com", "password": "pw", "role": "user"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_lookup_routes() {
    let app = app();
    let (id, _) = register_and_login(&app, "frank@example.com", "user").await;

    let (status, by_id) = send(&app, get(&format!("/user/id/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["data"]["email"], "frank@example.com");

    let (status, by_email) = send(&app, get("/user/email/frank@example.com", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_email["data"]["id"], id);

    let (status, by_name) = send(&app, get("/user/username/tester", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_name["data"]["id"], id);

    let (status, all) = send(&app, get("/user", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_with_costly_phc_string_is_rehashed() {
    let app = app();
    let (id, _) = register_and_login(&app, "gail@example.com", "user").await;

    let costly = "$argon2id$v=19$m=4194304,t=4294967295,p=1$c29tZXNhbHRzb21lc2FsdA$aGFzaGhhc2hoYXNoaGFzaGhhc2hoYXNoaGFzaGhhc2g";
    let update = json!({
        "name": "gail",
        "email": "gail@example.com",
        "password": costly,
        "role": "user"
    });
    let (status, _) = send(
        &app,
        json_request("PUT", &format!("/user/{}", id), None, update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 문자열 자체가 새 비밀번호로 해시되어 로그인이 즉시 끝남
    let (status, token) = send(
        &app,
        json_request(
            "POST",
            "/user/login",
            None,
            json!({"email": "gail@example.com", "password": costly}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "Bearer");
}

#[tokio::test]
async fn test_invalid_product_rejected() {
    let app = app();
    let (_, token) = register_and_login(&app, "hana@example.com", "admin").await;

    let mut blank_name = keyboard();
    blank_name["name"] = json!("   ");
    let mut zero_price = keyboard();
    zero_price["price"] = json!("0");

    for body in [blank_name, zero_price] {
        let (status, error) = send(
            &app,
            json_request("POST", "/admin/products", Some(&token), body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "VALIDATION_ERROR");
    }

    let (_, listed) = send(&app, get("/products", None)).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}
