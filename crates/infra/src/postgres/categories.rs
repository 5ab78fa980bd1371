//! Postgres category repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use shopadmin_catalog::{Category, CategoryRepository};
use shopadmin_core::{CategoryId, RepositoryError};

use super::backend;

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn category_from_row(row: &PgRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: CategoryId::from_uuid(row.try_get::<Uuid, _>("id")?),
        title: row.try_get("title")?,
    })
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query("SELECT id, title FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        row.map(|r| category_from_row(&r)).transpose().map_err(backend)
    }

    async fn exists(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(backend)
    }

    async fn list_by_title(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query("SELECT id, title FROM categories ORDER BY title, id")
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        rows.iter()
            .map(category_from_row)
            .collect::<Result<_, _>>()
            .map_err(backend)
    }

    async fn insert(&self, category: &Category) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO categories (id, title) VALUES ($1, $2)")
            .bind(category.id.as_uuid())
            .bind(&category.title)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
