use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::Link;

pub struct ListLinks<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> ListLinks<'a, R> {
    pub async fn execute(&self, category_id: Option<Uuid>) -> Result<Vec<Link>, AppError> {
        Ok(self.repo.list(category_id).await?)
    }
}
