use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::use_cases::categories::category_stats::CategoryStats;
use crate::application::use_cases::categories::create_category::CreateCategory;
use crate::application::use_cases::categories::delete_category::DeleteCategory;
use crate::application::use_cases::categories::get_category::GetCategory;
use crate::application::use_cases::categories::list_categories::ListCategories;
use crate::application::use_cases::categories::update_category::UpdateCategory;
use crate::bootstrap::app_context::AppContext;
use crate::domain::categories::category::Category;
use crate::presentation::http::responses;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub links_count: i64,
}

impl From<Category> for CategoryItem {
    fn from(c: Category) -> Self {
        CategoryItem {
            id: c.id,
            name: c.name,
            description: c.description,
            created_at: c.created_at,
            updated_at: c.updated_at,
            links_count: c.links_count,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryLinksCount {
    pub id: Uuid,
    pub name: String,
    pub links_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryStatsResponse {
    pub total_categories: i64,
    pub categories_with_links: Vec<CategoryLinksCount>,
}

#[utoipa::path(get, path = "/api/categories", tag = "Categories",
    responses((status = 200, body = [CategoryItem])))]
pub async fn list_categories(
    State(ctx): State<AppContext>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.category_repo();
    let uc = ListCategories {
        repo: repo.as_ref(),
    };
    let items: Vec<CategoryItem> = uc.execute().await?.into_iter().map(Into::into).collect();
    Ok(responses::ok_list(items))
}

#[utoipa::path(get, path = "/api/categories/{id}", tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses((status = 200, body = CategoryItem), (status = 404)))]
pub async fn get_category(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.category_repo();
    let uc = GetCategory {
        repo: repo.as_ref(),
    };
    let category = uc.execute(id).await?;
    Ok(responses::ok(CategoryItem::from(category)))
}

#[utoipa::path(post, path = "/api/categories", tag = "Categories",
    request_body = CreateCategoryRequest,
    responses((status = 201, body = CategoryItem), (status = 400), (status = 409)))]
pub async fn create_category(
    State(ctx): State<AppContext>,
    body: Option<Json<CreateCategoryRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.ok_or_else(|| AppError::Validation("Request body is required".into()))?;
    let name = req
        .name
        .ok_or_else(|| AppError::Validation("Category name is required and must not be empty".into()))?;

    let repo = ctx.category_repo();
    let uc = CreateCategory {
        repo: repo.as_ref(),
    };
    let category = uc.execute(&name, req.description).await?;
    Ok(responses::created(
        CategoryItem::from(category),
        "Category created successfully",
    ))
}

#[utoipa::path(put, path = "/api/categories/{id}", tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses((status = 200, body = CategoryItem), (status = 400), (status = 404), (status = 409)))]
pub async fn update_category(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    body: Option<Json<UpdateCategoryRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.ok_or_else(|| AppError::Validation("Request body is required".into()))?;

    let repo = ctx.category_repo();
    let uc = UpdateCategory {
        repo: repo.as_ref(),
    };
    let category = uc.execute(id, req.name, req.description).await?;
    Ok(responses::ok_message(
        CategoryItem::from(category),
        "Category updated successfully",
    ))
}

#[utoipa::path(delete, path = "/api/categories/{id}", tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses((status = 200), (status = 404)))]
pub async fn delete_category(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.category_repo();
    let uc = DeleteCategory {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(responses::ok_message(
        serde_json::json!({ "id": id }),
        "Category deleted successfully; its links are now uncategorized",
    ))
}

#[utoipa::path(get, path = "/api/categories/stats", tag = "Categories",
    responses((status = 200, body = CategoryStatsResponse)))]
pub async fn category_stats(
    State(ctx): State<AppContext>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.category_repo();
    let uc = CategoryStats {
        repo: repo.as_ref(),
    };
    let stats = uc.execute().await?;
    Ok(responses::ok(CategoryStatsResponse {
        total_categories: stats.total_categories,
        categories_with_links: stats
            .categories_with_links
            .into_iter()
            .map(|c| CategoryLinksCount {
                id: c.id,
                name: c.name,
                links_count: c.links_count,
            })
            .collect(),
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/stats", get(category_stats))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(ctx)
}
