use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::links::link::Link;

#[derive(Debug, Clone)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub pinned: bool,
}

/// Partial update. `category_id`: outer `None` => untouched; `Some(None)` =>
/// set NULL; `Some(Some(id))` => set to the value.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Option<Uuid>>,
    pub pinned: Option<bool>,
}

/// Aggregate counts over the links table.
#[derive(Debug, Clone)]
pub struct LinkCounts {
    pub total_links: i64,
    pub pinned_links: i64,
    pub uncategorized_links: i64,
    pub links_per_category: Vec<(String, i64)>,
}

#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// All links (optionally restricted to one category), pinned first,
    /// newest first within each group.
    async fn list(&self, category_id: Option<Uuid>) -> anyhow::Result<Vec<Link>>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Link>>;

    async fn find_by_url(&self, url: &str) -> anyhow::Result<Option<Link>>;

    async fn insert(&self, link: NewLink) -> anyhow::Result<Link>;

    async fn update(&self, id: Uuid, patch: LinkPatch) -> anyhow::Result<Option<Link>>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    /// Sets exactly `pinned` and `updated_at`.
    async fn set_pinned(&self, id: Uuid, pinned: bool) -> anyhow::Result<Option<Link>>;

    /// Case-insensitive substring match on title, ordered like `list`.
    async fn search_by_title(&self, term: &str) -> anyhow::Result<Vec<Link>>;

    /// Pinned links only, newest first.
    async fn pinned(&self) -> anyhow::Result<Vec<Link>>;

    async fn counts(&self) -> anyhow::Result<LinkCounts>;
}
