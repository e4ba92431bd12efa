use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::link_repository::LinkRepository;

pub struct DeleteLink<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> DeleteLink<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AppError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Link", id))
        }
    }
}
