use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::categories::category::Category;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name, each with its current link count.
    async fn list(&self) -> anyhow::Result<Vec<Category>>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Category>>;

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Category>>;

    async fn insert(&self, name: &str, description: Option<&str>) -> anyhow::Result<Category>;

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> anyhow::Result<Option<Category>>;

    /// Nulls the `category_id` of every dependent link and removes the row,
    /// in one transaction. Returns false when the id is unknown.
    async fn delete_and_detach(&self, id: Uuid) -> anyhow::Result<bool>;

    /// True when at least one category row with this id exists.
    async fn exists(&self, id: Uuid) -> anyhow::Result<bool>;
}
