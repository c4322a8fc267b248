//! Request spans with credentials scrubbed from the logged URI.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Query parameter names whose values never reach the logs.
const SENSITIVE_PARAMS: &[&str] = &[
    "token",
    "access_token",
    "accesstoken",
    "refresh_token",
    "refreshtoken",
    "password",
];

/// `MakeSpan` that tags each request with an id and a redacted URI
#[derive(Clone, Debug)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            request_id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            uri = %sanitize_uri(request.uri()),
        )
    }
}

/// `/api/members?clubId=2&token=abc` becomes `/api/members?clubId=2&token=[REDACTED]`
fn sanitize_uri(uri: &axum::http::Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE_PARAMS.contains(&key.to_ascii_lowercase().as_str()) => {
                format!("{key}=[REDACTED]")
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", uri.path(), pairs.join("&"))
}
