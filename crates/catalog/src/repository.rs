//! Repository seams for the catalog.
//!
//! Explicit interfaces decouple persistence from the in-memory entity
//! representation; implementations live in the infra crate (in-memory for
//! tests/dev, Postgres for production).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use shopadmin_core::{CategoryId, ProductId, RepositoryError, UserRef};

use crate::category::Category;
use crate::product::Product;

/// A product with its owner and category eagerly attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub owner: UserRef,
    pub category: Category,
}

/// One page of a newest-first product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<ProductDetail>,
    /// One-based page number this page was fetched for. Requests for page 0
    /// are treated as page 1.
    pub page: u32,
    pub per_page: u32,
    /// Total products across all pages.
    pub total: u64,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Fetch one product with owner and category attached.
    async fn find_detailed(&self, id: ProductId) -> Result<Option<ProductDetail>, RepositoryError>;

    /// Newest-first page of products with relations attached.
    async fn find_page(&self, page: u32, per_page: u32) -> Result<ProductPage, RepositoryError>;

    /// Up to `limit` products in `category`, excluding `exclude`, newest first.
    async fn find_by_category(
        &self,
        category: CategoryId,
        exclude: ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError>;

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn update(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;

    async fn exists(&self, id: CategoryId) -> Result<bool, RepositoryError>;

    /// All categories ordered by title.
    async fn list_by_title(&self) -> Result<Vec<Category>, RepositoryError>;

    async fn insert(&self, category: &Category) -> Result<(), RepositoryError>;
}
