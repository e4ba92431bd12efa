use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::error_log::{ErrorLog, NewErrorLog};

#[derive(Debug, Clone, Default)]
pub struct ErrorLogFilter {
    pub method: Option<String>,
    pub endpoint: Option<String>,
    pub status_code: Option<i32>,
    pub error_type: Option<String>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// One page of log rows plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct ErrorLogPage {
    pub entries: Vec<ErrorLog>,
    pub total: i64,
}

#[derive(Debug, Clone)]
pub struct ErrorLogCounts {
    pub total_requests: i64,
    pub by_status_code: Vec<(i32, i64)>,
    pub by_method: Vec<(String, i64)>,
    pub top_endpoints: Vec<(String, i64)>,
    pub average_duration_ms: f64,
}

#[async_trait]
pub trait ErrorLogRepository: Send + Sync {
    async fn insert(&self, entry: NewErrorLog) -> anyhow::Result<()>;

    /// Newest first; `offset`/`limit` select the page.
    async fn list(
        &self,
        filter: ErrorLogFilter,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<ErrorLogPage>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<ErrorLog>>;

    async fn counts(
        &self,
        start_date: Option<chrono::DateTime<chrono::Utc>>,
        end_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> anyhow::Result<ErrorLogCounts>;

    /// Deletes rows whose request time predates the cutoff; returns how many.
    async fn purge_older_than(
        &self,
        cutoff: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<i64>;
}
