use crate::application::dto::stats::{LinkStatsDto, PerCategoryCountDto};
use crate::application::error::AppError;
use crate::application::ports::link_repository::LinkRepository;

pub struct LinkStats<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> LinkStats<'a, R> {
    pub async fn execute(&self) -> Result<LinkStatsDto, AppError> {
        let counts = self.repo.counts().await?;
        Ok(LinkStatsDto {
            total_links: counts.total_links,
            pinned_links: counts.pinned_links,
            uncategorized_links: counts.uncategorized_links,
            links_per_category: counts
                .links_per_category
                .into_iter()
                .map(|(category_name, links_count)| PerCategoryCountDto {
                    category_name,
                    links_count,
                })
                .collect(),
        })
    }
}
