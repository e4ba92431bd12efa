use crate::application::error::AppError;
use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::Link;

pub struct PinnedLinks<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> PinnedLinks<'a, R> {
    pub async fn execute(&self) -> Result<Vec<Link>, AppError> {
        Ok(self.repo.pinned().await?)
    }
}
