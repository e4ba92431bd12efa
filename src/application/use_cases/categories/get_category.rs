use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::categories::category::Category;

pub struct GetCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> GetCategory<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<Category, AppError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category", id))
    }
}
