use crate::application::error::AppError;
use crate::application::ports::error_log_repository::ErrorLogRepository;
use crate::domain::errors::error_log::NewErrorLog;

/// Header names never persisted to the log.
const SENSITIVE_HEADERS: [&str; 3] = ["authorization", "cookie", "x-api-key"];

pub struct RecordRequest<'a, R: ErrorLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ErrorLogRepository + ?Sized> RecordRequest<'a, R> {
    pub async fn execute(&self, mut entry: NewErrorLog) -> Result<(), AppError> {
        if entry.method.trim().is_empty() || entry.endpoint.trim().is_empty() {
            return Err(AppError::Validation(
                "Method and endpoint are required for a log entry".into(),
            ));
        }
        entry.method = entry.method.to_uppercase();
        entry.request_headers = entry.request_headers.take().map(sanitize_headers);
        Ok(self.repo.insert(entry).await?)
    }
}

fn sanitize_headers(headers: serde_json::Value) -> serde_json::Value {
    match headers {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .filter(|(k, _)| !SENSITIVE_HEADERS.contains(&k.to_lowercase().as_str()))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_sensitive_headers_case_insensitively() {
        let sanitized = sanitize_headers(json!({
            "Authorization": "Bearer secret",
            "Cookie": "session=abc",
            "X-Api-Key": "k",
            "User-Agent": "curl/8.0",
        }));
        let map = sanitized.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("User-Agent"));
    }
}
