use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CategoryLinksCountDto {
    pub id: Uuid,
    pub name: String,
    pub links_count: i64,
}

#[derive(Debug, Clone)]
pub struct CategoryStatsDto {
    pub total_categories: i64,
    pub categories_with_links: Vec<CategoryLinksCountDto>,
}

#[derive(Debug, Clone)]
pub struct PerCategoryCountDto {
    pub category_name: String,
    pub links_count: i64,
}

#[derive(Debug, Clone)]
pub struct LinkStatsDto {
    pub total_links: i64,
    pub pinned_links: i64,
    pub uncategorized_links: i64,
    pub links_per_category: Vec<PerCategoryCountDto>,
}

#[derive(Debug, Clone)]
pub struct ErrorStatsDto {
    pub total_requests: i64,
    pub status_code_counts: Vec<(i32, i64)>,
    pub method_counts: Vec<(String, i64)>,
    pub top_endpoints: Vec<(String, i64)>,
    pub average_response_time_ms: f64,
}
