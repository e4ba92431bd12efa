use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::category_repository::CategoryRepository;

pub struct DeleteCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> DeleteCategory<'a, R> {
    /// Detaches every dependent link (category_id -> NULL) and removes the
    /// row as one atomic unit; links themselves are never deleted.
    pub async fn execute(&self, id: Uuid) -> Result<(), AppError> {
        if self.repo.delete_and_detach(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Category", id))
        }
    }
}
