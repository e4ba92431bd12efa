use crate::application::dto::stats::{CategoryLinksCountDto, CategoryStatsDto};
use crate::application::error::AppError;
use crate::application::ports::category_repository::CategoryRepository;

pub struct CategoryStats<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CategoryRepository + ?Sized> CategoryStats<'a, R> {
    pub async fn execute(&self) -> Result<CategoryStatsDto, AppError> {
        let categories = self.repo.list().await?;
        let categories_with_links = categories
            .iter()
            .map(|c| CategoryLinksCountDto {
                id: c.id,
                name: c.name.clone(),
                links_count: c.links_count,
            })
            .collect();
        Ok(CategoryStatsDto {
            total_categories: categories.len() as i64,
            categories_with_links,
        })
    }
}
