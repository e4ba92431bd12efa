use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::error_log_repository::ErrorLogRepository;
use crate::domain::errors::error_log::ErrorLog;

pub struct GetError<'a, R: ErrorLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ErrorLogRepository + ?Sized> GetError<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<ErrorLog, AppError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Error log", id))
    }
}
