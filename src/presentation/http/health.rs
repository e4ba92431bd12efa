use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<PgPool>) -> Json<HealthResp> {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .is_ok();
    let status = if db_ok { "ok" } else { "degraded" };
    Json(HealthResp {
        status,
        message: "LinkDisplay API is running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PingResp {
    pub message: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "Health",
    responses((status = 200, body = PingResp))
)]
pub async fn ping() -> Json<PingResp> {
    Json(PingResp {
        message: "pong",
        timestamp: chrono::Utc::now(),
    })
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .with_state(pool)
}
