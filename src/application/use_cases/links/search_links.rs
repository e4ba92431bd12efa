use crate::application::error::AppError;
use crate::application::ports::link_repository::LinkRepository;
use crate::domain::links::link::Link;

pub struct SearchLinks<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> SearchLinks<'a, R> {
    /// Case-insensitive substring match on title. An empty or whitespace-only
    /// term matches every link, keeping GET /links/search?q= symmetric with
    /// GET /links.
    pub async fn execute(&self, term: &str) -> Result<Vec<Link>, AppError> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return Ok(self.repo.list(None).await?);
        }
        Ok(self.repo.search_by_title(trimmed).await?)
    }
}
