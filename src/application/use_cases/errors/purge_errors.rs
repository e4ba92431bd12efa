use chrono::{Duration, Utc};

use crate::application::error::AppError;
use crate::application::ports::error_log_repository::ErrorLogRepository;

pub const DEFAULT_RETENTION_DAYS: i64 = 30;

pub struct PurgeErrors<'a, R: ErrorLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ErrorLogRepository + ?Sized> PurgeErrors<'a, R> {
    /// Deletes log rows older than `days` (default 30). Returns the number of
    /// rows removed.
    pub async fn execute(&self, days: Option<i64>) -> Result<i64, AppError> {
        let days = days.unwrap_or(DEFAULT_RETENTION_DAYS);
        if days < 1 {
            return Err(AppError::Validation("days must be >= 1".into()));
        }
        let cutoff = Utc::now() - Duration::days(days);
        Ok(self.repo.purge_older_than(cutoff).await?)
    }
}
