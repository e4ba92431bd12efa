use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::link_repository::{LinkPatch, NewLink};
use crate::application::use_cases::links::create_link::CreateLink;
use crate::application::use_cases::links::delete_link::DeleteLink;
use crate::application::use_cases::links::get_link::GetLink;
use crate::application::use_cases::links::link_stats::LinkStats;
use crate::application::use_cases::links::list_links::ListLinks;
use crate::application::use_cases::links::pinned_links::PinnedLinks;
use crate::application::use_cases::links::search_links::SearchLinks;
use crate::application::use_cases::links::toggle_pin::TogglePin;
use crate::application::use_cases::links::update_link::UpdateLink;
use crate::bootstrap::app_context::AppContext;
use crate::domain::links::link::Link;
use crate::presentation::http::responses;

#[derive(Debug, Serialize, ToSchema)]
pub struct LinkItem {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub pinned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Link> for LinkItem {
    fn from(l: Link) -> Self {
        LinkItem {
            id: l.id,
            title: l.title,
            url: l.url,
            description: l.description,
            category_id: l.category_id,
            category_name: l.category_name,
            pinned: l.pinned,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub pinned: Option<bool>,
}

/// Distinguishes "field absent" from "field set to null" in a PUT body, so a
/// link can be moved to uncategorized without resending everything else.
#[derive(Debug, Clone)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateLinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub category_id: DoubleOption<Uuid>,
    pub pinned: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TogglePinRequest {
    pub pinned: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PerCategoryCount {
    pub category_name: String,
    pub links_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LinkStatsResponse {
    pub total_links: i64,
    pub pinned_links: i64,
    pub uncategorized_links: i64,
    pub links_per_category: Vec<PerCategoryCount>,
}

#[utoipa::path(get, path = "/api/links", tag = "Links",
    params(("category_id" = Option<Uuid>, Query, description = "Restrict to one category")),
    responses((status = 200, body = [LinkItem])))]
pub async fn list_links(
    State(ctx): State<AppContext>,
    Query(q): Query<ListLinksQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.link_repo();
    let uc = ListLinks {
        repo: repo.as_ref(),
    };
    let items: Vec<LinkItem> = uc
        .execute(q.category_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(responses::ok_list(items))
}

#[utoipa::path(get, path = "/api/links/{id}", tag = "Links",
    params(("id" = Uuid, Path, description = "Link ID")),
    responses((status = 200, body = LinkItem), (status = 404)))]
pub async fn get_link(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.link_repo();
    let uc = GetLink {
        repo: repo.as_ref(),
    };
    let link = uc.execute(id).await?;
    Ok(responses::ok(LinkItem::from(link)))
}

#[utoipa::path(post, path = "/api/links", tag = "Links",
    request_body = CreateLinkRequest,
    responses((status = 201, body = LinkItem), (status = 400), (status = 409)))]
pub async fn create_link(
    State(ctx): State<AppContext>,
    body: Option<Json<CreateLinkRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.ok_or_else(|| AppError::Validation("Request body is required".into()))?;
    let title = req
        .title
        .ok_or_else(|| AppError::Validation("Link title is required and must not be empty".into()))?;
    let url = req
        .url
        .ok_or_else(|| AppError::Validation("Link URL is required".into()))?;

    let links = ctx.link_repo();
    let categories = ctx.category_repo();
    let uc = CreateLink {
        links: links.as_ref(),
        categories: categories.as_ref(),
    };
    let link = uc
        .execute(NewLink {
            title,
            url,
            description: req.description,
            category_id: req.category_id,
            pinned: req.pinned.unwrap_or(false),
        })
        .await?;
    Ok(responses::created(
        LinkItem::from(link),
        "Link created successfully",
    ))
}

#[utoipa::path(put, path = "/api/links/{id}", tag = "Links",
    params(("id" = Uuid, Path, description = "Link ID")),
    request_body = UpdateLinkRequest,
    responses((status = 200, body = LinkItem), (status = 400), (status = 404), (status = 409)))]
pub async fn update_link(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    body: Option<Json<UpdateLinkRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.ok_or_else(|| AppError::Validation("Request body is required".into()))?;
    let patch = LinkPatch {
        title: req.title,
        url: req.url,
        description: req.description,
        category_id: match req.category_id {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(cid) => Some(Some(cid)),
        },
        pinned: req.pinned,
    };

    let links = ctx.link_repo();
    let categories = ctx.category_repo();
    let uc = UpdateLink {
        links: links.as_ref(),
        categories: categories.as_ref(),
    };
    let link = uc.execute(id, patch).await?;
    Ok(responses::ok_message(
        LinkItem::from(link),
        "Link updated successfully",
    ))
}

#[utoipa::path(delete, path = "/api/links/{id}", tag = "Links",
    params(("id" = Uuid, Path, description = "Link ID")),
    responses((status = 200), (status = 404)))]
pub async fn delete_link(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.link_repo();
    let uc = DeleteLink {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(responses::ok_message(
        serde_json::json!({ "id": id }),
        "Link deleted successfully",
    ))
}

#[utoipa::path(patch, path = "/api/links/{id}/pin", tag = "Links",
    params(("id" = Uuid, Path, description = "Link ID")),
    request_body = TogglePinRequest,
    responses((status = 200, body = LinkItem), (status = 404)))]
pub async fn toggle_pin(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    body: Option<Json<TogglePinRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.ok_or_else(|| AppError::Validation("Request body is required".into()))?;
    let pinned = req
        .pinned
        .ok_or_else(|| AppError::Validation("pinned is required".into()))?;

    let repo = ctx.link_repo();
    let uc = TogglePin {
        repo: repo.as_ref(),
    };
    let link = uc.execute(id, pinned).await?;
    Ok(responses::ok_message(
        LinkItem::from(link),
        "Link pin status updated successfully",
    ))
}

#[utoipa::path(get, path = "/api/links/search", tag = "Links",
    params(("q" = Option<String>, Query, description = "Title substring, case-insensitive; empty matches all")),
    responses((status = 200, body = [LinkItem])))]
pub async fn search_links(
    State(ctx): State<AppContext>,
    Query(q): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let term = q.q.unwrap_or_default();
    let repo = ctx.link_repo();
    let uc = SearchLinks {
        repo: repo.as_ref(),
    };
    let items: Vec<LinkItem> = uc
        .execute(&term)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(responses::ok_search(items, term.trim()))
}

#[utoipa::path(get, path = "/api/links/pinned", tag = "Links",
    responses((status = 200, body = [LinkItem])))]
pub async fn pinned_links(State(ctx): State<AppContext>) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.link_repo();
    let uc = PinnedLinks {
        repo: repo.as_ref(),
    };
    let items: Vec<LinkItem> = uc.execute().await?.into_iter().map(Into::into).collect();
    Ok(responses::ok_list(items))
}

#[utoipa::path(get, path = "/api/links/stats", tag = "Links",
    responses((status = 200, body = LinkStatsResponse)))]
pub async fn link_stats(State(ctx): State<AppContext>) -> Result<impl IntoResponse, AppError> {
    let repo = ctx.link_repo();
    let uc = LinkStats {
        repo: repo.as_ref(),
    };
    let stats = uc.execute().await?;
    Ok(responses::ok(LinkStatsResponse {
        total_links: stats.total_links,
        pinned_links: stats.pinned_links,
        uncategorized_links: stats.uncategorized_links,
        links_per_category: stats
            .links_per_category
            .into_iter()
            .map(|c| PerCategoryCount {
                category_name: c.category_name,
                links_count: c.links_count,
            })
            .collect(),
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/links", get(list_links).post(create_link))
        .route("/links/search", get(search_links))
        .route("/links/pinned", get(pinned_links))
        .route("/links/stats", get(link_stats))
        .route(
            "/links/:id",
            get(get_link).put(update_link).delete(delete_link),
        )
        .route("/links/:id/pin", patch(toggle_pin))
        .with_state(ctx)
}
