//! Gateway routes against a mock backend

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_missing_authorization_returns_401() {
    let backend = MockBackend::new().await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(&app, get("/api/members", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["message"], "Falta el token de autorización");
    assert!(backend.received_paths().await.is_empty());
}

#[tokio::test]
async fn test_unauthorized_message_follows_accept_language() {
    let backend = MockBackend::new().await;
    let app = test_app(&backend.uri(), None);

    let request = Request::builder()
        .uri("/api/clubs")
        .header("Accept-Language", "en-US,en;q=0.9,es;q=0.5")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_empty_bearer_token_returns_401() {
    let backend = MockBackend::new().await;
    let app = test_app(&backend.uri(), None);

    let request = Request::builder()
        .uri("/api/payments")
        .header("Authorization", "Bearer ")
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_checked_locally_when_secret_configured() {
    let backend = MockBackend::new().await;
    let app = test_app(&backend.uri(), Some("shared-secret"));

    let expired = jwt_with_ttl("shared-secret", -120);
    let (status, _) = call(&app, get("/api/clubs", Some(&expired))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = jwt_with_ttl("other-secret", 600);
    let (status, _) = call(&app, get("/api/clubs", Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(backend.received_paths().await.is_empty());

    Mock::given(method("GET"))
        .and(path("/clubs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&backend.server)
        .await;
    let valid = jwt_with_ttl("shared-secret", 600);
    let (status, body) = call(&app, get("/api/clubs", Some(&valid))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_forwards_query_and_token() {
    let backend = MockBackend::new().await;
    Mock::given(method("GET"))
        .and(path("/members"))
        .and(query_param("clubId", "1"))
        .and(query_param("status", "active"))
        .and(bearer_token("caller-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [member_json(1, "Ana")] })),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(
        &app,
        get("/api/members?clubId=1&status=active", Some("caller-token")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [member_json(1, "Ana")] }));
}

#[tokio::test]
async fn test_invalid_body_returns_422_without_forwarding() {
    let backend = MockBackend::new().await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/clubs",
            Some("caller-token"),
            json!({ "name": "", "email": "not-an-email" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation");
    assert_eq!(body["message"], "Los datos enviados no son válidos");
    assert!(body["details"].is_object());
    assert!(backend.received_paths().await.is_empty());
}

#[tokio::test]
async fn test_malformed_json_returns_json_error() {
    let backend = MockBackend::new().await;
    let app = test_app(&backend.uri(), None);

    let request = Request::builder()
        .method("POST")
        .uri("/api/sponsors")
        .header("Authorization", "Bearer caller-token")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_create_forwards_body_and_relays_status() {
    let backend = MockBackend::new().await;
    Mock::given(method("POST"))
        .and(path("/members"))
        .and(bearer_token("caller-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(member_json(9, "Luis")))
        .expect(1)
        .mount(&backend.server)
        .await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/members",
            Some("caller-token"),
            json!({
                "clubId": 1,
                "firstName": "Luis",
                "lastName": "Pérez",
                "documentId": "30000009"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, member_json(9, "Luis"));
}

#[tokio::test]
async fn test_backend_error_relayed_verbatim() {
    let backend = MockBackend::new().await;
    Mock::given(method("POST"))
        .and(path("/members"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "DNI duplicado" })),
        )
        .mount(&backend.server)
        .await;
    let app = test_app(&backend.uri(), None);

    let request = json_request(
        "POST",
        "/api/members",
        Some("caller-token"),
        json!({
            "clubId": 1,
            "firstName": "Luis",
            "lastName": "Pérez",
            "documentId": "30000009"
        }),
    );
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "message": "DNI duplicado" }));
}

#[tokio::test]
async fn test_patch_and_put_keep_method() {
    let backend = MockBackend::new().await;
    for verb in ["PATCH", "PUT"] {
        Mock::given(method(verb))
            .and(path("/sponsors/4"))
            .and(body_json(json!({ "name": "Panadería Sur" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4,
                "name": "Panadería Sur"
            })))
            .expect(1)
            .mount(&backend.server)
            .await;
    }
    let app = test_app(&backend.uri(), None);

    for verb in ["PATCH", "PUT"] {
        let (status, body) = call(
            &app,
            json_request(
                verb,
                "/api/sponsors/4",
                Some("caller-token"),
                json!({ "name": "Panadería Sur" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Panadería Sur");
    }
}

#[tokio::test]
async fn test_delete_relays_empty_body() {
    let backend = MockBackend::new().await;
    Mock::given(method("DELETE"))
        .and(path("/activities/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;
    let app = test_app(&backend.uri(), None);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/activities/3")
        .header("Authorization", "Bearer caller-token")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let backend = MockBackend::new().await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(&app, get("/api/roles/abc", Some("caller-token"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(backend.received_paths().await.is_empty());
}

#[tokio::test]
async fn test_backend_down_returns_502() {
    // Port 9 (discard) is not listening
    let app = test_app("http://127.0.0.1:9", None);

    let (status, body) = call(&app, get("/api/clubs", Some("caller-token"))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "backend_unavailable");
    assert_eq!(body["message"], "No se pudo conectar con el servidor");
}

#[tokio::test]
async fn test_login_validates_then_forwards() {
    let backend = MockBackend::new().await;
    backend.mock_login("access-1", "refresh-1").await;
    let app = test_app(&backend.uri(), None);

    let (status, _) = call(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "no-arroba", "password": "x" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": " tesoreria@club.example ", "password": "secreta" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accessToken"], "access-1");
    assert_eq!(backend.received_paths().await, vec!["/auth/login".to_string()]);
}

#[tokio::test]
async fn test_login_rejection_relayed() {
    let backend = MockBackend::new().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Credenciales inválidas" })),
        )
        .mount(&backend.server)
        .await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "tesoreria@club.example", "password": "mala" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Credenciales inválidas");
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let backend = MockBackend::new().await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(
        &app,
        json_request("POST", "/api/auth/refresh", None, json!({ "refreshToken": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(backend.received_paths().await.is_empty());
}

#[tokio::test]
async fn test_refresh_forwarded() {
    let backend = MockBackend::new().await;
    backend
        .mock_refresh_success("refresh-1", "access-2", "refresh-2", 0, 1)
        .await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/auth/refresh",
            None,
            json!({ "refresh_token": "refresh-1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accessToken"], "access-2");
    assert_eq!(body["refreshToken"], "refresh-2");
}

#[tokio::test]
async fn test_profile_uses_caller_token() {
    let backend = MockBackend::new().await;
    backend.mock_profile("caller-token").await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(&app, get("/api/auth/profile", Some("caller-token"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, profile_json());

    let (status, _) = call(&app, get("/api/auth/profile", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_backend_401_without_body_reported_as_invalid_token() {
    let backend = MockBackend::new().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend.server)
        .await;
    let app = test_app(&backend.uri(), None);

    let (status, body) = call(&app, get("/api/auth/profile", Some("revoked-token"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token inválido o expirado");
}
