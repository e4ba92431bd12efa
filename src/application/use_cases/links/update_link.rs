use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::link_repository::{LinkPatch, LinkRepository};
use crate::domain::links::link::{self, Link};

pub struct UpdateLink<'a, L, C>
where
    L: LinkRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub links: &'a L,
    pub categories: &'a C,
}

impl<'a, L, C> UpdateLink<'a, L, C>
where
    L: LinkRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub async fn execute(&self, id: Uuid, patch: LinkPatch) -> Result<Link, AppError> {
        if let Some(t) = patch.title.as_deref() {
            link::validate_title(t).map_err(AppError::Validation)?;
        }
        if let Some(u) = patch.url.as_deref() {
            link::validate_url(u).map_err(AppError::Validation)?;
        }
        if let Some(d) = patch.description.as_deref() {
            link::validate_description(d).map_err(AppError::Validation)?;
        }

        let current = self
            .links
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link", id))?;

        if let Some(Some(cid)) = patch.category_id {
            if !self.categories.exists(cid).await? {
                return Err(AppError::Validation(format!(
                    "Category with ID {} does not exist",
                    cid
                )));
            }
        }

        if let Some(u) = patch.url.as_deref() {
            if u != current.url && self.links.find_by_url(u).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "Link with URL '{}' already exists",
                    u
                )));
            }
        }

        self.links
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Link", id))
    }
}
