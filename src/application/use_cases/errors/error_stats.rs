use crate::application::dto::stats::ErrorStatsDto;
use crate::application::error::AppError;
use crate::application::ports::error_log_repository::ErrorLogRepository;

pub struct ErrorStats<'a, R: ErrorLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ErrorLogRepository + ?Sized> ErrorStats<'a, R> {
    pub async fn execute(
        &self,
        start_date: Option<chrono::DateTime<chrono::Utc>>,
        end_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<ErrorStatsDto, AppError> {
        let counts = self.repo.counts(start_date, end_date).await?;
        Ok(ErrorStatsDto {
            total_requests: counts.total_requests,
            status_code_counts: counts.by_status_code,
            method_counts: counts.by_method,
            top_endpoints: counts.top_endpoints,
            average_response_time_ms: counts.average_duration_ms,
        })
    }
}
