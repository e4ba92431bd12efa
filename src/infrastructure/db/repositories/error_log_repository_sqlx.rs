use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::error_log_repository::{
    ErrorLogCounts, ErrorLogFilter, ErrorLogPage, ErrorLogRepository,
};
use crate::domain::errors::error_log::{ErrorLog, NewErrorLog};
use crate::infrastructure::db::PgPool;

pub struct SqlxErrorLogRepository {
    pub pool: PgPool,
}

impl SqlxErrorLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// NULL-tolerant predicates keep this a single statement for any filter
// combination; unset filters collapse to TRUE.
const FILTER_WHERE: &str = r#"($1::TEXT IS NULL OR method = $1)
   AND ($2::TEXT IS NULL OR endpoint LIKE '%' || $2 || '%')
   AND ($3::INT IS NULL OR status_code = $3)
   AND ($4::TEXT IS NULL OR error_type = $4)
   AND ($5::TIMESTAMPTZ IS NULL OR request_time >= $5)
   AND ($6::TIMESTAMPTZ IS NULL OR request_time <= $6)"#;

fn map_entry(r: PgRow) -> ErrorLog {
    ErrorLog {
        id: r.get("id"),
        method: r.get("method"),
        endpoint: r.get("endpoint"),
        request_data: r.get("request_data"),
        request_params: r.get("request_params"),
        request_headers: r.get("request_headers"),
        client_ip: r.get("client_ip"),
        user_agent: r.get("user_agent"),
        status_code: r.get("status_code"),
        response_data: r.get("response_data"),
        error_message: r.get("error_message"),
        error_type: r.get("error_type"),
        request_time: r.get("request_time"),
        response_time: r.get("response_time"),
        duration_ms: r.get("duration_ms"),
    }
}

#[async_trait]
impl ErrorLogRepository for SqlxErrorLogRepository {
    async fn insert(&self, entry: NewErrorLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO error_logs
                   (method, endpoint, request_data, request_params, request_headers,
                    client_ip, user_agent, status_code, response_data, error_message,
                    error_type, request_time, response_time, duration_ms)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"#,
        )
        .bind(&entry.method)
        .bind(&entry.endpoint)
        .bind(&entry.request_data)
        .bind(&entry.request_params)
        .bind(&entry.request_headers)
        .bind(&entry.client_ip)
        .bind(&entry.user_agent)
        .bind(entry.status_code)
        .bind(&entry.response_data)
        .bind(&entry.error_message)
        .bind(&entry.error_type)
        .bind(entry.request_time)
        .bind(entry.response_time)
        .bind(entry.duration_ms)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(
        &self,
        filter: ErrorLogFilter,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<ErrorLogPage> {
        let method = filter.method.map(|m| m.to_uppercase());

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*)::BIGINT FROM error_logs WHERE {FILTER_WHERE}"
        ))
        .bind(&method)
        .bind(&filter.endpoint)
        .bind(filter.status_code)
        .bind(&filter.error_type)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(&format!(
            r#"SELECT id, method, endpoint, request_data, request_params, request_headers,
                      client_ip, user_agent, status_code, response_data, error_message,
                      error_type, request_time, response_time, duration_ms
               FROM error_logs
               WHERE {FILTER_WHERE}
               ORDER BY request_time DESC
               LIMIT $7 OFFSET $8"#
        ))
        .bind(&method)
        .bind(&filter.endpoint)
        .bind(filter.status_code)
        .bind(&filter.error_type)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(ErrorLogPage {
            entries: rows.into_iter().map(map_entry).collect(),
            total,
        })
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<ErrorLog>> {
        let row = sqlx::query(
            r#"SELECT id, method, endpoint, request_data, request_params, request_headers,
                      client_ip, user_agent, status_code, response_data, error_message,
                      error_type, request_time, response_time, duration_ms
               FROM error_logs WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_entry))
    }

    async fn counts(
        &self,
        start_date: Option<chrono::DateTime<chrono::Utc>>,
        end_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> anyhow::Result<ErrorLogCounts> {
        const WINDOW: &str = r#"($1::TIMESTAMPTZ IS NULL OR request_time >= $1)
           AND ($2::TIMESTAMPTZ IS NULL OR request_time <= $2)"#;

        let summary = sqlx::query(&format!(
            r#"SELECT COUNT(*)::BIGINT AS total,
                      COALESCE(AVG(duration_ms), 0)::DOUBLE PRECISION AS avg_duration
               FROM error_logs WHERE {WINDOW}"#
        ))
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;

        let by_status_code = sqlx::query(&format!(
            r#"SELECT status_code, COUNT(*)::BIGINT AS count
               FROM error_logs WHERE {WINDOW}
               GROUP BY status_code ORDER BY status_code"#
        ))
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| (r.get("status_code"), r.get("count")))
        .collect();

        let by_method = sqlx::query(&format!(
            r#"SELECT method, COUNT(*)::BIGINT AS count
               FROM error_logs WHERE {WINDOW}
               GROUP BY method ORDER BY count DESC"#
        ))
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| (r.get("method"), r.get("count")))
        .collect();

        let top_endpoints = sqlx::query(&format!(
            r#"SELECT endpoint, COUNT(*)::BIGINT AS count
               FROM error_logs WHERE {WINDOW}
               GROUP BY endpoint ORDER BY count DESC
               LIMIT 10"#
        ))
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| (r.get("endpoint"), r.get("count")))
        .collect();

        Ok(ErrorLogCounts {
            total_requests: summary.get("total"),
            by_status_code,
            by_method,
            top_endpoints,
            average_duration_ms: summary.get("avg_duration"),
        })
    }

    async fn purge_older_than(
        &self,
        cutoff: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<i64> {
        let res = sqlx::query("DELETE FROM error_logs WHERE request_time < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() as i64)
    }
}
