use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::state::AppState;

/// Data URIs and links are logged up to this many characters.
const MAX_LOGGED_FIELD_LEN: usize = 64;

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/")
}

fn shorten_bulky_fields(mut value: Value) -> Value {
    if let Value::Object(ref mut map) = value {
        for field in ["signature", "qrCode"] {
            if let Some(Value::String(text)) = map.get_mut(field) {
                if text.chars().count() > MAX_LOGGED_FIELD_LEN {
                    let head: String = text.chars().take(MAX_LOGGED_FIELD_LEN).collect();
                    *text = format!("{head}... ({} bytes)", text.len());
                }
            }
        }
    }
    value
}

fn filter_sensitive_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered_headers = headers.clone();

    for header_name in [http::header::AUTHORIZATION, http::header::COOKIE] {
        if filtered_headers.contains_key(&header_name) {
            filtered_headers.insert(header_name, HeaderValue::from_static("[REDACTED]"));
        }
    }

    filtered_headers
}

fn json_or_empty(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(json) => shorten_bulky_fields(json),
        Err(_) => Value::Object(serde_json::Map::new()),
    }
}

pub async fn http_logger(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path();
    let version = req.version();
    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if should_ignore_path(path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let (parts, body) = req.into_parts();
    let bytes = buffer_body("request", body).await?;
    let req_body = json_or_empty(&bytes);
    let req = Request::from_parts(parts, Body::from(bytes));

    let mut response = next.run(req).await;

    let latency = start_time.elapsed();
    let status = response.status();

    let should_log_body = matches!(method, Method::POST | Method::PUT | Method::PATCH);
    let res_body = if should_log_body {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let json_body = json_or_empty(&bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        json_body
    } else {
        Value::Object(serde_json::Map::new())
    };

    // Query strings carry whole certificates, so only the path is logged
    tracing::info!(
        method = ?method,
        path = %path,
        query_len = uri.query().map(str::len).unwrap_or(0),
        x_request_id = %x_request_id,
        version = ?version,
        req_headers = ?filter_sensitive_headers(&req_headers),
        req_body = %req_body,
        status = ?status,
        latency_ms = latency.as_millis(),
        res_body = %res_body,
        app_env = %state.config.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("failed to read {direction} body: {err}"),
            ));
        }
    };

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_long_signature_is_shortened() {
        let signature = format!("data:image/png;base64,{}", "A".repeat(500));
        let logged = shorten_bulky_fields(json!({ "id": "abc", "signature": signature }));

        let shortened = logged["signature"].as_str().unwrap();
        assert!(shortened.starts_with("data:image/png;base64,AAAA"));
        assert!(shortened.ends_with("(522 bytes)"));
        assert_eq!(logged["id"], "abc");
    }

    #[test]
    fn test_short_fields_are_kept() {
        let logged = shorten_bulky_fields(json!({ "qrCode": "https://x/verify?reg=1" }));
        assert_eq!(logged["qrCode"], "https://x/verify?reg=1");
    }

    #[test]
    fn test_authorization_header_is_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(http::header::ACCEPT, HeaderValue::from_static("text/html"));

        let filtered = filter_sensitive_headers(&headers);
        assert_eq!(filtered[http::header::AUTHORIZATION], "[REDACTED]");
        assert_eq!(filtered[http::header::ACCEPT], "text/html");
    }
}
