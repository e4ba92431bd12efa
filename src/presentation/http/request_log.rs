//! Request logging middleware.
//!
//! Every API call is recorded to the error log store: request details, the
//! response status, and timing. Bodies are captured as JSON where they parse;
//! response bodies only for failed calls. Persistence runs on a spawned task
//! and its failures never affect the response being returned.

use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::application::use_cases::errors::record_request::RecordRequest;
use crate::bootstrap::app_context::AppContext;
use crate::domain::errors::error_log::NewErrorLog;

const BODY_CAPTURE_LIMIT: usize = 64 * 1024;

// The log's own endpoints are skipped so browsing the log does not write to
// it, and probes are skipped to keep the table meaningful.
fn should_skip(path: &str) -> bool {
    path.starts_with("/api/errors")
        || path.starts_with("/api/docs")
        || path.starts_with("/api/openapi")
        || path == "/api/health"
        || path == "/api/ping"
}

fn headers_to_json(headers: &http::HeaderMap) -> Option<serde_json::Value> {
    if headers.is_empty() {
        return None;
    }
    let map: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .filter_map(|(k, v)| {
            v.to_str()
                .ok()
                .map(|v| (k.as_str().to_string(), serde_json::Value::String(v.into())))
        })
        .collect();
    Some(serde_json::Value::Object(map))
}

fn query_to_json(query: Option<&str>) -> Option<serde_json::Value> {
    let query = query?;
    if query.is_empty() {
        return None;
    }
    let map: serde_json::Map<String, serde_json::Value> = url::form_urlencoded::parse(
        query.as_bytes(),
    )
    .map(|(k, v)| (k.into_owned(), serde_json::Value::String(v.into_owned())))
    .collect();
    Some(serde_json::Value::Object(map))
}

fn parse_json_body(bytes: &Bytes) -> Option<serde_json::Value> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

fn error_type_for(status: u16) -> &'static str {
    match status {
        400 => "ValidationError",
        404 => "NotFoundError",
        409 => "ConflictError",
        500.. => "InternalError",
        _ => "HTTPError",
    }
}

pub async fn record(State(ctx): State<AppContext>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if should_skip(&path) {
        return next.run(req).await;
    }

    let started = Instant::now();
    let request_time = Utc::now();
    let method = req.method().to_string();
    let request_params = query_to_json(req.uri().query());
    let request_headers = headers_to_json(req.headers());
    let client_ip = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());
    let user_agent = req
        .headers()
        .get(http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // Mutating verbs carry a body worth keeping; buffer and re-attach it.
    // Bodies without a declared length, or above the cap, pass through
    // untouched rather than risk truncating what the handler sees.
    let declared_len = req
        .headers()
        .get(http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    let capture_request_body = matches!(method.as_str(), "POST" | "PUT" | "PATCH")
        && declared_len.is_some_and(|len| len > 0 && len <= BODY_CAPTURE_LIMIT);
    let (req, request_data) = if capture_request_body {
        let (parts, body) = req.into_parts();
        match axum::body::to_bytes(body, BODY_CAPTURE_LIMIT).await {
            Ok(bytes) => {
                let data = parse_json_body(&bytes);
                (Request::from_parts(parts, Body::from(bytes)), data)
            }
            Err(_) => (Request::from_parts(parts, Body::empty()), None),
        }
    } else {
        (req, None)
    };

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let duration_ms = started.elapsed().as_millis() as i32;

    // Only failures keep their response payload around.
    let (response, response_data) = if status >= 400 {
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, BODY_CAPTURE_LIMIT)
            .await
            .unwrap_or_default();
        let data = parse_json_body(&bytes);
        (Response::from_parts(parts, Body::from(bytes)), data)
    } else {
        (response, None)
    };

    let (error_message, error_type) = if status >= 400 {
        let message = response_data
            .as_ref()
            .and_then(|v| v.get("error").or_else(|| v.get("message")))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| Some(format!("HTTP {}", status)));
        (message, Some(error_type_for(status).to_string()))
    } else {
        (None, None)
    };

    let entry = NewErrorLog {
        method,
        endpoint: path,
        request_data,
        request_params,
        request_headers,
        client_ip,
        user_agent,
        status_code: status as i32,
        response_data,
        error_message,
        error_type,
        request_time,
        response_time: Some(Utc::now()),
        duration_ms: Some(duration_ms),
    };

    let repo = ctx.error_log_repo();
    tokio::spawn(async move {
        let uc = RecordRequest {
            repo: repo.as_ref(),
        };
        if let Err(e) = uc.execute(entry).await {
            tracing::warn!(error = ?e, "failed to persist request log entry");
        }
    });

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_browsing_and_probe_paths_are_skipped() {
        assert!(should_skip("/api/errors"));
        assert!(should_skip("/api/errors/statistics"));
        assert!(should_skip("/api/docs"));
        assert!(should_skip("/api/health"));
        assert!(!should_skip("/api/links"));
        assert!(!should_skip("/api/categories/stats"));
    }

    #[test]
    fn query_strings_become_json_objects() {
        let parsed = query_to_json(Some("q=google&category_id=42")).unwrap();
        assert_eq!(parsed["q"], "google");
        assert_eq!(parsed["category_id"], "42");
        assert!(query_to_json(Some("")).is_none());
        assert!(query_to_json(None).is_none());
    }

    #[test]
    fn status_classes_map_to_error_kinds() {
        assert_eq!(error_type_for(400), "ValidationError");
        assert_eq!(error_type_for(404), "NotFoundError");
        assert_eq!(error_type_for(409), "ConflictError");
        assert_eq!(error_type_for(500), "InternalError");
        assert_eq!(error_type_for(405), "HTTPError");
    }
}
