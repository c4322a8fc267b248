//! Error response localization and normalization
//!
//! Every 4xx/5xx leaving the proxy is JSON `{error, message}`. Messages the
//! proxy generated itself are rendered in the caller's `Accept-Language`;
//! framework rejections (text/plain) are replaced by a generic JSON body;
//! JSON relayed from the backend passes through untouched.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ErrorResponse, LocalizableError};
use crate::i18n::{t, Locale, MessageKey};

/// Paths that answer in plain text by design
const PLAIN_TEXT_PATHS: &[&str] = &["/health", "/ready", "/metrics"];

pub async fn localize_error_response(
    State(default_locale): State<Locale>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let locale = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(Locale::from_accept_language)
        .unwrap_or(default_locale);

    let response = next.run(request).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }
    if PLAIN_TEXT_PATHS.contains(&path.as_str()) {
        return response;
    }

    if let Some(localizable) = response.extensions().get::<LocalizableError>().cloned() {
        return render(status, localizable.error_type, locale, localizable.key, localizable.details);
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false);
    if is_json {
        return response;
    }

    let (error_type, key) = generic_error(status);
    render(status, error_type, locale, key, None)
}

fn render(
    status: StatusCode,
    error_type: &'static str,
    locale: Locale,
    key: MessageKey,
    details: Option<serde_json::Value>,
) -> Response {
    let body = Json(ErrorResponse {
        error: error_type.to_string(),
        message: t(locale, key).to_string(),
        details,
    });
    (status, body).into_response()
}

fn generic_error(status: StatusCode) -> (&'static str, MessageKey) {
    match status {
        StatusCode::BAD_REQUEST => ("bad_request", MessageKey::BadRequest),
        // Locally missing tokens are labelled; a bare 401 comes from the backend
        StatusCode::UNAUTHORIZED => ("unauthorized", MessageKey::InvalidToken),
        StatusCode::FORBIDDEN => ("forbidden", MessageKey::Forbidden),
        StatusCode::NOT_FOUND => ("not_found", MessageKey::NotFound),
        StatusCode::METHOD_NOT_ALLOWED => ("method_not_allowed", MessageKey::BadRequest),
        StatusCode::CONFLICT => ("conflict", MessageKey::Conflict),
        StatusCode::UNPROCESSABLE_ENTITY => ("validation", MessageKey::ValidationFailed),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("unsupported_media_type", MessageKey::BadRequest),
        StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => {
            ("backend_timeout", MessageKey::BackendTimeout)
        }
        _ if status.is_client_error() => ("client_error", MessageKey::BadRequest),
        _ => ("internal_error", MessageKey::InternalError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use axum::{routing::get, Router};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(router: Router) -> Router {
        router.layer(axum::middleware::from_fn_with_state(
            Locale::Es,
            localize_error_response,
        ))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(uri: &str, lang: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(lang) = lang {
            builder = builder.header(header::ACCEPT_LANGUAGE, lang);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_app_error_rendered_in_requested_locale() {
        let router = app(Router::new().route(
            "/fail",
            get(|| async { AppError::Upstream("refused".to_string()) }),
        ));

        let response = router
            .oneshot(request("/fail", Some("en-US,en;q=0.9")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"], "backend_unavailable");
        assert_eq!(json["message"], "Could not reach the server");
    }

    #[tokio::test]
    async fn test_default_locale_when_header_missing() {
        let router = app(Router::new().route(
            "/fail",
            get(|| async { AppError::SessionExpired }),
        ));
        let response = router.oneshot(request("/fail", None)).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(
            json["message"],
            "La sesión ha expirado, inicie sesión nuevamente"
        );
    }

    #[tokio::test]
    async fn test_plain_text_rejection_normalized() {
        let router = app(Router::new().route(
            "/text",
            get(|| async { (StatusCode::NOT_FOUND, "nope") }),
        ));
        let response = router.oneshot(request("/text", Some("en"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Resource not found");
    }

    #[tokio::test]
    async fn test_bare_backend_401_reported_as_invalid_token() {
        let router = app(Router::new().route(
            "/profile",
            get(|| async { StatusCode::UNAUTHORIZED }),
        ));
        let response = router.oneshot(request("/profile", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "unauthorized");
        assert_eq!(json["message"], "Token inválido o expirado");
    }

    #[tokio::test]
    async fn test_relayed_json_passes_through() {
        let router = app(Router::new().route(
            "/relay",
            get(|| async {
                (
                    StatusCode::CONFLICT,
                    Json(serde_json::json!({ "message": "DNI duplicado" })),
                )
            }),
        ));
        let response = router.oneshot(request("/relay", Some("en"))).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["message"], "DNI duplicado");
    }

    #[tokio::test]
    async fn test_ready_endpoint_not_normalized() {
        let router = app(Router::new().route(
            "/ready",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "not_ready") }),
        ));
        let response = router.oneshot(request("/ready", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"not_ready");
    }
}
