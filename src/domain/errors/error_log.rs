use uuid::Uuid;

/// One logged API call: request details, response status, and timing.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    pub id: Uuid,
    pub method: String,
    pub endpoint: String,
    pub request_data: Option<serde_json::Value>,
    pub request_params: Option<serde_json::Value>,
    pub request_headers: Option<serde_json::Value>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub status_code: i32,
    pub response_data: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub error_type: Option<String>,
    pub request_time: chrono::DateTime<chrono::Utc>,
    pub response_time: Option<chrono::DateTime<chrono::Utc>>,
    pub duration_ms: Option<i32>,
}

/// Insert payload for a log row; the store assigns `id`.
#[derive(Debug, Clone)]
pub struct NewErrorLog {
    pub method: String,
    pub endpoint: String,
    pub request_data: Option<serde_json::Value>,
    pub request_params: Option<serde_json::Value>,
    pub request_headers: Option<serde_json::Value>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub status_code: i32,
    pub response_data: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub error_type: Option<String>,
    pub request_time: chrono::DateTime<chrono::Utc>,
    pub response_time: Option<chrono::DateTime<chrono::Utc>>,
    pub duration_ms: Option<i32>,
}
