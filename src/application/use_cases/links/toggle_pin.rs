use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::Link;

pub struct TogglePin<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> TogglePin<'a, R> {
    /// Sets exactly the pinned flag (and `updated_at`); every other field is
    /// left untouched so a toggle can never clobber a concurrent edit.
    pub async fn execute(&self, id: Uuid, pinned: bool) -> Result<Link, AppError> {
        self.repo
            .set_pinned(id, pinned)
            .await?
            .ok_or_else(|| AppError::not_found("Link", id))
    }
}
