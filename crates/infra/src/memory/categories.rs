//! In-memory category repository.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use shopadmin_catalog::{Category, CategoryRepository};
use shopadmin_core::{CategoryId, RepositoryError};

use super::poisoned;

#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    rows: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(&id).cloned())
    }

    async fn exists(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.contains_key(&id))
    }

    async fn list_by_title(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        let mut categories: Vec<Category> = rows.values().cloned().collect();
        categories.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.as_uuid().cmp(b.id.as_uuid())));
        Ok(categories)
    }

    async fn insert(&self, category: &Category) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(category.id, category.clone());
        Ok(())
    }
}
