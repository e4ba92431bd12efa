use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::error_log_repository::ErrorLogFilter;
use crate::application::use_cases::errors::error_stats::ErrorStats;
use crate::application::use_cases::errors::get_error::GetError;
use crate::application::use_cases::errors::list_errors::ListErrors;
use crate::application::use_cases::errors::purge_errors::PurgeErrors;
use crate::bootstrap::app_context::AppContext;
use crate::domain::errors::error_log::ErrorLog;
use crate::presentation::http::responses;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorLogItem {
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

impl From<ErrorLog> for ErrorLogItem {
    fn from(e: ErrorLog) -> Self {
        ErrorLogItem {
            id: e.id,
            method: e.method,
            endpoint: e.endpoint,
            request_data: e.request_data,
            request_params: e.request_params,
            request_headers: e.request_headers,
            client_ip: e.client_ip,
            user_agent: e.user_agent,
            status_code: e.status_code,
            response_data: e.response_data,
            error_message: e.error_message,
            error_type: e.error_type,
            request_time: e.request_time,
            response_time: e.response_time,
            duration_ms: e.duration_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListErrorsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub method: Option<String>,
    pub endpoint: Option<String>,
    pub status_code: Option<i32>,
    pub error_type: Option<String>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CleanupQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorLogListResponse {
    pub errors: Vec<ErrorLogItem>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorStatsResponse {
    pub total_requests: i64,
    pub status_code_counts: Vec<StatusCodeCount>,
    pub method_counts: Vec<MethodCount>,
    pub top_endpoints: Vec<EndpointCount>,
    pub average_response_time_ms: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCodeCount {
    pub status_code: i32,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MethodCount {
    pub method: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointCount {
    pub endpoint: String,
    pub count: i64,
}

#[utoipa::path(get, path = "/api/errors", tag = "Errors",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("per_page" = Option<i64>, Query, description = "Page size, max 100"),
        ("method" = Option<String>, Query, description = "Filter by HTTP method"),
        ("endpoint" = Option<String>, Query, description = "Filter by endpoint substring"),
        ("status_code" = Option<i32>, Query, description = "Filter by status code"),
        ("error_type" = Option<String>, Query, description = "Filter by error type"),
        ("start_date" = Option<String>, Query, description = "Window start (RFC 3339)"),
        ("end_date" = Option<String>, Query, description = "Window end (RFC 3339)")
    ),
    responses((status = 200, body = ErrorLogListResponse), (status = 400)))]
pub async fn list_errors(
    State(ctx): State<AppContext>,
    Query(q): Query<ListErrorsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ErrorLogFilter {
        method: q.method,
        endpoint: q.endpoint,
        status_code: q.status_code,
        error_type: q.error_type,
        start_date: q.start_date,
        end_date: q.end_date,
    };
    let repo = ctx.error_log_repo();
    let uc = ListErrors {
        repo: repo.as_ref(),
    };
    let (result, page, per_page) = uc.execute(filter, q.page, q.per_page).await?;
    let pages = if result.total == 0 {
        0
    } else {
        (result.total + per_page - 1) / per_page
    };
    Ok(responses::ok_message(
        ErrorLogListResponse {
            errors: result.entries.into_iter().map(Into::into).collect(),
            total: result.total,
            page,
            per_page,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        },
        "Error logs retrieved successfully",
    ))
}

#[utoipa::path(get, path = "/api/errors/{id}", tag = "Errors",
    params(("id" = Uuid, Path, description = "Error log ID")),
    responses((status = 200, body = ErrorLogItem), (status = 404)))]
pub async fn get_error(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.error_log_repo();
    let uc = GetError {
        repo: repo.as_ref(),
    };
    let entry = uc.execute(id).await?;
    Ok(responses::ok(ErrorLogItem::from(entry)))
}

#[utoipa::path(get, path = "/api/errors/statistics", tag = "Errors",
    params(
        ("start_date" = Option<String>, Query, description = "Window start (RFC 3339)"),
        ("end_date" = Option<String>, Query, description = "Window end (RFC 3339)")
    ),
    responses((status = 200, body = ErrorStatsResponse)))]
pub async fn error_statistics(
    State(ctx): State<AppContext>,
    Query(q): Query<StatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.error_log_repo();
    let uc = ErrorStats {
        repo: repo.as_ref(),
    };
    let stats = uc.execute(q.start_date, q.end_date).await?;
    Ok(responses::ok(ErrorStatsResponse {
        total_requests: stats.total_requests,
        status_code_counts: stats
            .status_code_counts
            .into_iter()
            .map(|(status_code, count)| StatusCodeCount { status_code, count })
            .collect(),
        method_counts: stats
            .method_counts
            .into_iter()
            .map(|(method, count)| MethodCount { method, count })
            .collect(),
        top_endpoints: stats
            .top_endpoints
            .into_iter()
            .map(|(endpoint, count)| EndpointCount { endpoint, count })
            .collect(),
        average_response_time_ms: stats.average_response_time_ms,
    }))
}

#[utoipa::path(delete, path = "/api/errors/cleanup", tag = "Errors",
    params(("days" = Option<i64>, Query, description = "Retention in days, default 30")),
    responses((status = 200), (status = 400)))]
pub async fn cleanup_errors(
    State(ctx): State<AppContext>,
    Query(q): Query<CleanupQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.error_log_repo();
    let uc = PurgeErrors {
        repo: repo.as_ref(),
    };
    let deleted = uc
        .execute(q.days.or(Some(ctx.cfg.error_log_retention_days)))
        .await?;
    Ok(responses::ok_message(
        serde_json::json!({ "deleted": deleted }),
        "Old error logs deleted successfully",
    ))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/errors", get(list_errors))
        .route("/errors/statistics", get(error_statistics))
        .route("/errors/cleanup", delete(cleanup_errors))
        .route("/errors/:id", get(get_error))
        .with_state(ctx)
}
