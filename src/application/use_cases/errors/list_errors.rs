use crate::application::error::AppError;
use crate::application::ports::error_log_repository::{
    ErrorLogFilter, ErrorLogPage, ErrorLogRepository,
};

pub const DEFAULT_PER_PAGE: i64 = 50;
pub const MAX_PER_PAGE: i64 = 100;

pub struct ListErrors<'a, R: ErrorLogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ErrorLogRepository + ?Sized> ListErrors<'a, R> {
    pub async fn execute(
        &self,
        filter: ErrorLogFilter,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<(ErrorLogPage, i64, i64), AppError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::Validation("page must be >= 1".into()));
        }
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(AppError::Validation(format!(
                "per_page must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }
        let offset = (page - 1) * per_page;
        let result = self.repo.list(filter, offset, per_page).await?;
        Ok((result, page, per_page))
    }
}
