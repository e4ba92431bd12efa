use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::error::AppError;

/// The response contract every endpoint speaks:
/// `{"success": true, "data": ..., "message"?, "count"?}` on success and
/// `{"success": false, "error": ..., "message": ...}` on failure.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            data,
            message: None,
            count: None,
            search_term: None,
        }),
    )
}

pub fn ok_message<T: Serialize>(data: T, message: &str) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            data,
            message: Some(message.into()),
            count: None,
            search_term: None,
        }),
    )
}

pub fn created<T: Serialize>(data: T, message: &str) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::CREATED,
        Json(Envelope {
            success: true,
            data,
            message: Some(message.into()),
            count: None,
            search_term: None,
        }),
    )
}

/// List payloads also carry their length, as the frontend renders counts
/// without re-measuring.
pub fn ok_list<T: Serialize>(items: Vec<T>) -> (StatusCode, Json<Envelope<Vec<T>>>) {
    let count = items.len();
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            data: items,
            message: None,
            count: Some(count),
            search_term: None,
        }),
    )
}

pub fn ok_search<T: Serialize>(items: Vec<T>, term: &str) -> (StatusCode, Json<Envelope<Vec<T>>>) {
    let count = items.len();
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            data: items,
            message: None,
            count: Some(count),
            search_term: Some(term.into()),
        }),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let (error, message) = match &self {
            AppError::Validation(detail) => (
                detail.clone(),
                "The request could not be processed due to invalid data.".to_string(),
            ),
            AppError::NotFound { .. } => (
                self.to_string(),
                "The requested resource was not found.".to_string(),
            ),
            AppError::Conflict(detail) => (
                detail.clone(),
                "The request conflicts with existing data.".to_string(),
            ),
            AppError::Internal(source) => {
                // the only place full diagnostic context is surfaced
                tracing::error!(error = ?source, "unhandled internal error");
                (
                    "Internal server error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };
        (
            status,
            Json(ErrorBody {
                success: false,
                error,
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_unset_fields() {
        let (status, Json(env)) = ok(serde_json::json!({"id": 1}));
        assert_eq!(status, StatusCode::OK);
        let body = serde_json::to_value(&env).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 1);
        assert!(body.get("message").is_none());
        assert!(body.get("count").is_none());
    }

    #[test]
    fn list_envelope_carries_count() {
        let (_, Json(env)) = ok_list(vec!["a", "b", "c"]);
        let body = serde_json::to_value(&env).unwrap();
        assert_eq!(body["count"], 3);
    }

    #[test]
    fn search_envelope_echoes_the_term() {
        let (_, Json(env)) = ok_search(vec!["a"], "goog");
        let body = serde_json::to_value(&env).unwrap();
        assert_eq!(body["search_term"], "goog");
        assert_eq!(body["count"], 1);
    }

    #[test]
    fn error_body_shape_is_stable() {
        let body = ErrorBody {
            success: false,
            error: "Link not found".into(),
            message: "The requested resource was not found.".into(),
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "Link not found");
    }
}
