use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::Link;

pub struct GetLink<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> GetLink<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<Link, AppError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link", id))
    }
}
