use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::categories::category::{self, Category};

pub struct UpdateCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> UpdateCategory<'a, R> {
    pub async fn execute(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Category, AppError> {
        if let Some(n) = name.as_deref() {
            category::validate_name(n).map_err(AppError::Validation)?;
        }
        if let Some(d) = description.as_deref() {
            category::validate_description(d).map_err(AppError::Validation)?;
        }

        let current = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category", id))?;

        if let Some(n) = name.as_deref() {
            if n != current.name && self.repo.find_by_name(n).await?.is_some() {
                return Err(AppError::Conflict(format!("Category '{}' already exists", n)));
            }
        }

        self.repo
            .update(id, name, description)
            .await?
            .ok_or_else(|| AppError::not_found("Category", id))
    }
}
