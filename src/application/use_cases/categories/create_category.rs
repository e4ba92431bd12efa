use crate::application::error::AppError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::categories::category::{self, Category};

pub struct CreateCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> CreateCategory<'a, R> {
    pub async fn execute(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Category, AppError> {
        category::validate_name(name).map_err(AppError::Validation)?;
        if let Some(d) = description.as_deref() {
            category::validate_description(d).map_err(AppError::Validation)?;
        }
        if self.repo.find_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }
        Ok(self.repo.insert(name, description.as_deref()).await?)
    }
}
