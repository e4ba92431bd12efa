use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::link_repository::{LinkCounts, LinkPatch, LinkRepository, NewLink};
use crate::domain::links::link::Link;
use crate::infrastructure::db::PgPool;

pub struct SqlxLinkRepository {
    pub pool: PgPool,
}

impl SqlxLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Every read joins the category name in; the explicit sort key keeps the
// pinned-first invariant out of implicit iteration order.
const SELECT_LINK: &str = r#"SELECT l.id, l.title, l.url, l.description, l.category_id,
       c.name AS category_name, l.pinned, l.created_at, l.updated_at
  FROM links l
  LEFT JOIN categories c ON c.id = l.category_id"#;

// The search term is a literal substring, never a pattern. LIKE
// metacharacters in it must match themselves so the result set is identical
// to the client mirror's plain substring test.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn map_link(r: PgRow) -> Link {
    Link {
        id: r.get("id"),
        title: r.get("title"),
        url: r.get("url"),
        description: r.get("description"),
        category_id: r.get("category_id"),
        category_name: r.get("category_name"),
        pinned: r.get("pinned"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl LinkRepository for SqlxLinkRepository {
    async fn list(&self, category_id: Option<Uuid>) -> anyhow::Result<Vec<Link>> {
        let rows = if let Some(cid) = category_id {
            sqlx::query(&format!(
                "{SELECT_LINK} WHERE l.category_id = $1 ORDER BY l.pinned DESC, l.created_at DESC"
            ))
            .bind(cid)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(&format!(
                "{SELECT_LINK} ORDER BY l.pinned DESC, l.created_at DESC"
            ))
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows.into_iter().map(map_link).collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Link>> {
        let row = sqlx::query(&format!("{SELECT_LINK} WHERE l.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_link))
    }

    async fn find_by_url(&self, url: &str) -> anyhow::Result<Option<Link>> {
        let row = sqlx::query(&format!("{SELECT_LINK} WHERE l.url = $1 LIMIT 1"))
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_link))
    }

    async fn insert(&self, link: NewLink) -> anyhow::Result<Link> {
        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO links (title, url, description, category_id, pinned)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(&link.title)
        .bind(&link.url)
        .bind(&link.description)
        .bind(link.category_id)
        .bind(link.pinned)
        .fetch_one(&self.pool)
        .await?;
        self.get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("link row missing after insert"))
    }

    async fn update(&self, id: Uuid, patch: LinkPatch) -> anyhow::Result<Option<Link>> {
        // category_id: absent => untouched; present => set (possibly to NULL)
        let row = match patch.category_id {
            None => {
                sqlx::query(
                    r#"UPDATE links SET
                            title = COALESCE($1, title),
                            url = COALESCE($2, url),
                            description = COALESCE($3, description),
                            pinned = COALESCE($4, pinned),
                            updated_at = now()
                       WHERE id = $5
                       RETURNING id"#,
                )
                .bind(patch.title)
                .bind(patch.url)
                .bind(patch.description)
                .bind(patch.pinned)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            Some(new_category) => {
                sqlx::query(
                    r#"UPDATE links SET
                            title = COALESCE($1, title),
                            url = COALESCE($2, url),
                            description = COALESCE($3, description),
                            pinned = COALESCE($4, pinned),
                            category_id = $5,
                            updated_at = now()
                       WHERE id = $6
                       RETURNING id"#,
                )
                .bind(patch.title)
                .bind(patch.url)
                .bind(patch.description)
                .bind(patch.pinned)
                .bind(new_category)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        match row {
            Some(_) => self.get(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> anyhow::Result<Option<Link>> {
        let row = sqlx::query(
            "UPDATE links SET pinned = $1, updated_at = now() WHERE id = $2 RETURNING id",
        )
        .bind(pinned)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(_) => self.get(id).await,
            None => Ok(None),
        }
    }

    async fn search_by_title(&self, term: &str) -> anyhow::Result<Vec<Link>> {
        let like = format!("%{}%", escape_like(term));
        let rows = sqlx::query(&format!(
            r"{SELECT_LINK} WHERE l.title ILIKE $1 ESCAPE '\' ORDER BY l.pinned DESC, l.created_at DESC"
        ))
        .bind(like)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_link).collect())
    }

    async fn pinned(&self) -> anyhow::Result<Vec<Link>> {
        let rows = sqlx::query(&format!(
            "{SELECT_LINK} WHERE l.pinned ORDER BY l.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_link).collect())
    }

    async fn counts(&self) -> anyhow::Result<LinkCounts> {
        let totals = sqlx::query(
            r#"SELECT COUNT(*)::BIGINT AS total,
                      COUNT(*) FILTER (WHERE pinned)::BIGINT AS pinned,
                      COUNT(*) FILTER (WHERE category_id IS NULL)::BIGINT AS uncategorized
               FROM links"#,
        )
        .fetch_one(&self.pool)
        .await?;

        let per_category = sqlx::query(
            r#"SELECT c.name, COUNT(l.id)::BIGINT AS links_count
               FROM categories c
               LEFT JOIN links l ON l.category_id = c.id
               GROUP BY c.id, c.name
               ORDER BY c.name ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(LinkCounts {
            total_links: totals.get("total"),
            pinned_links: totals.get("pinned"),
            uncategorized_links: totals.get("uncategorized"),
            links_per_category: per_category
                .into_iter()
                .map(|r| (r.get("name"), r.get("links_count")))
                .collect(),
        })
    }
}
