//! Postgres product repository.
//!
//! Eager loading is a join: detail selects pull the category title and owner
//! name alongside the product columns in one query.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use shopadmin_catalog::{Category, Product, ProductDetail, ProductPage, ProductRepository};
use shopadmin_core::{CategoryId, ProductId, RepositoryError, UserId, UserRef};

use super::backend;

const PRODUCT_COLUMNS: &str =
    "p.id, p.title, p.description, p.price, p.image, p.category_id, p.user_id, p.created_at";

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::from_uuid(row.try_get::<Uuid, _>("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        image: row.try_get("image")?,
        category_id: CategoryId::from_uuid(row.try_get::<Uuid, _>("category_id")?),
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
        created_at: row.try_get("created_at")?,
    })
}

fn detail_from_row(row: &PgRow) -> Result<ProductDetail, sqlx::Error> {
    let product = product_from_row(row)?;
    let owner = UserRef::new(product.user_id, row.try_get::<String, _>("owner_name")?);
    let category = Category {
        id: product.category_id,
        title: row.try_get("category_title")?,
    };
    Ok(ProductDetail {
        product,
        owner,
        category,
    })
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        row.map(|r| product_from_row(&r)).transpose().map_err(backend)
    }

    async fn find_detailed(&self, id: ProductId) -> Result<Option<ProductDetail>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS}, c.title AS category_title, u.name AS owner_name \
             FROM products p \
             JOIN categories c ON c.id = p.category_id \
             JOIN users u ON u.id = p.user_id \
             WHERE p.id = $1"
        );
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        row.map(|r| detail_from_row(&r)).transpose().map_err(backend)
    }

    async fn find_page(&self, page: u32, per_page: u32) -> Result<ProductPage, RepositoryError> {
        // Pages are one-based; page 0 reads as the first page.
        let page = page.max(1);
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS}, c.title AS category_title, u.name AS owner_name \
             FROM products p \
             JOIN categories c ON c.id = p.category_id \
             JOIN users u ON u.id = p.user_id \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query(&sql)
            .bind(per_page as i64)
            .bind((page as i64 - 1) * per_page as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        let items = rows
            .iter()
            .map(detail_from_row)
            .collect::<Result<_, _>>()
            .map_err(backend)?;

        Ok(ProductPage {
            items,
            page,
            per_page,
            total: total as u64,
        })
    }

    async fn find_by_category(
        &self,
        category: CategoryId,
        exclude: ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p \
             WHERE p.category_id = $1 AND p.id <> $2 \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $3"
        );
        let rows = sqlx::query(&sql)
            .bind(category.as_uuid())
            .bind(exclude.as_uuid())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        rows.iter()
            .map(product_from_row)
            .collect::<Result<_, _>>()
            .map_err(backend)
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO products \
             (id, title, description, price, image, category_id, user_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(product.id.as_uuid())
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.category_id.as_uuid())
        .bind(product.user_id.as_uuid())
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        tracing::debug!(product_id = %product.id, "product row inserted");
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE products \
             SET title = $2, description = $3, price = $4, image = $5, category_id = $6 \
             WHERE id = $1",
        )
        .bind(product.id.as_uuid())
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.category_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
