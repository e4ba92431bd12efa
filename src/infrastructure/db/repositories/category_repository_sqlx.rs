use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::categories::category::Category;
use crate::infrastructure::db::PgPool;

pub struct SqlxCategoryRepository {
    pub pool: PgPool,
}

impl SqlxCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_category(r: PgRow) -> Category {
    Category {
        id: r.get("id"),
        name: r.get("name"),
        description: r.get("description"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        links_count: r.get("links_count"),
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn list(&self) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.name, c.description, c.created_at, c.updated_at,
                      COUNT(l.id)::BIGINT AS links_count
               FROM categories c
               LEFT JOIN links l ON l.category_id = c.id
               GROUP BY c.id
               ORDER BY c.name ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_category).collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query(
            r#"SELECT c.id, c.name, c.description, c.created_at, c.updated_at,
                      COUNT(l.id)::BIGINT AS links_count
               FROM categories c
               LEFT JOIN links l ON l.category_id = c.id
               WHERE c.id = $1
               GROUP BY c.id"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_category))
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query(
            r#"SELECT c.id, c.name, c.description, c.created_at, c.updated_at,
                      COUNT(l.id)::BIGINT AS links_count
               FROM categories c
               LEFT JOIN links l ON l.category_id = c.id
               WHERE c.name = $1
               GROUP BY c.id"#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_category))
    }

    async fn insert(&self, name: &str, description: Option<&str>) -> anyhow::Result<Category> {
        let row = sqlx::query(
            r#"INSERT INTO categories (name, description)
               VALUES ($1, $2)
               RETURNING id, name, description, created_at, updated_at, 0::BIGINT AS links_count"#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_category(row))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query(
            r#"UPDATE categories SET
                    name = COALESCE($1, name),
                    description = COALESCE($2, description),
                    updated_at = now()
               WHERE id = $3
               RETURNING id"#,
        )
        .bind(name)
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(_) => self.get(id).await,
            None => Ok(None),
        }
    }

    async fn delete_and_detach(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE links SET category_id = NULL WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn exists(&self, id: Uuid) -> anyhow::Result<bool> {
        let present = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(present)
    }
}
