use crate::application::error::AppError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::link_repository::{LinkRepository, NewLink};
use crate::domain::links::link::{self, Link};

pub struct CreateLink<'a, L, C>
where
    L: LinkRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub links: &'a L,
    pub categories: &'a C,
}

impl<'a, L, C> CreateLink<'a, L, C>
where
    L: LinkRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub async fn execute(&self, input: NewLink) -> Result<Link, AppError> {
        link::validate_title(&input.title).map_err(AppError::Validation)?;
        link::validate_url(&input.url).map_err(AppError::Validation)?;
        if let Some(d) = input.description.as_deref() {
            link::validate_description(d).map_err(AppError::Validation)?;
        }

        // referential integrity is checked at write time
        if let Some(cid) = input.category_id {
            if !self.categories.exists(cid).await? {
                return Err(AppError::Validation(format!(
                    "Category with ID {} does not exist",
                    cid
                )));
            }
        }

        if self.links.find_by_url(&input.url).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Link with URL '{}' already exists",
                input.url
            )));
        }

        Ok(self.links.insert(input).await?)
    }
}
