//! In-memory product repository.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use shopadmin_catalog::{
    CategoryRepository, Product, ProductDetail, ProductPage, ProductRepository,
};
use shopadmin_core::{CategoryId, ProductId, RepositoryError};

use super::poisoned;
use super::{InMemoryCategoryRepository, InMemoryUserDirectory};

/// Products keyed by id, with category and owner lookups for eager loading.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    rows: RwLock<HashMap<ProductId, Product>>,
    categories: Arc<InMemoryCategoryRepository>,
    users: Arc<InMemoryUserDirectory>,
}

impl InMemoryProductRepository {
    pub fn new(
        categories: Arc<InMemoryCategoryRepository>,
        users: Arc<InMemoryUserDirectory>,
    ) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            categories,
            users,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Newest first: creation time, id as tiebreaker (v7 ids are time-ordered).
    fn sort_newest_first(products: &mut [Product]) {
        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
    }

    async fn detail(&self, product: Product) -> Result<ProductDetail, RepositoryError> {
        let category = self
            .categories
            .find(product.category_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::backend(format!(
                    "dangling category reference {}",
                    product.category_id
                ))
            })?;
        let owner = self.users.user_ref(product.user_id);
        Ok(ProductDetail {
            product,
            owner,
            category,
        })
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(&id).cloned())
    }

    async fn find_detailed(&self, id: ProductId) -> Result<Option<ProductDetail>, RepositoryError> {
        let product = {
            let rows = self.rows.read().map_err(|_| poisoned())?;
            rows.get(&id).cloned()
        };
        match product {
            Some(product) => Ok(Some(self.detail(product).await?)),
            None => Ok(None),
        }
    }

    async fn find_page(&self, page: u32, per_page: u32) -> Result<ProductPage, RepositoryError> {
        let mut products: Vec<Product> = {
            let rows = self.rows.read().map_err(|_| poisoned())?;
            rows.values().cloned().collect()
        };
        let total = products.len() as u64;
        Self::sort_newest_first(&mut products);

        // Pages are one-based; page 0 reads as the first page.
        let page = page.max(1);
        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let mut items = Vec::new();
        for product in products.into_iter().skip(start).take(per_page as usize) {
            items.push(self.detail(product).await?);
        }

        Ok(ProductPage {
            items,
            page,
            per_page,
            total,
        })
    }

    async fn find_by_category(
        &self,
        category: CategoryId,
        exclude: ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut products: Vec<Product> = {
            let rows = self.rows.read().map_err(|_| poisoned())?;
            rows.values()
                .filter(|p| p.category_id == category && p.id != exclude)
                .cloned()
                .collect()
        };
        Self::sort_newest_first(&mut products);
        products.truncate(limit as usize);
        Ok(products)
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.remove(&id);
        Ok(())
    }
}
