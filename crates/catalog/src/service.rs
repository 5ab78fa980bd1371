//! Product lifecycle service.
//!
//! Orchestrates validation, image storage, and persistence for product CRUD.
//! The image-file lifecycle is coupled to the record lifecycle but not
//! transactionally: deletes of replaced or orphaned files are best-effort,
//! and a failure between the file step and the record step is accepted as
//! transient inconsistency.

use std::sync::Arc;

use shopadmin_core::{Checker, DomainError, DomainResult, ProductId, UserId};
use shopadmin_storage::{FileStore, UploadedFile};

use crate::category::Category;
use crate::product::{Product, ProductDraft, ProductFields, check_fields, check_image};
use crate::repository::{CategoryRepository, ProductDetail, ProductPage, ProductRepository};

/// Fixed page size for product listings.
pub const PAGE_SIZE: u32 = 12;

/// Maximum number of related products attached to a `show` result.
pub const RELATED_LIMIT: u32 = 4;

/// Namespace on the public store under which product images live.
const IMAGE_NAMESPACE: &str = "products";

/// A `show` result: the product with relations, plus other products from the
/// same category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub detail: ProductDetail,
    pub related: Vec<Product>,
}

/// An `edit` result: the product plus every category, ordered by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEditForm {
    pub product: Product,
    pub categories: Vec<Category>,
}

pub struct ProductService<R, C, S> {
    products: Arc<R>,
    categories: Arc<C>,
    store: Arc<S>,
}

impl<R, C, S> ProductService<R, C, S>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: FileStore,
{
    pub fn new(products: Arc<R>, categories: Arc<C>, store: Arc<S>) -> Self {
        Self {
            products,
            categories,
            store,
        }
    }

    /// Newest-first page of products with owner and category attached.
    /// Pages are one-based; an empty page is a valid result.
    pub async fn list(&self, page: u32) -> DomainResult<ProductPage> {
        Ok(self.products.find_page(page, PAGE_SIZE).await?)
    }

    /// Categories for the create form, ordered by title.
    ///
    /// Callers must divert to category creation when this comes back empty;
    /// `create` itself only reports the missing reference as a field error.
    pub async fn create_form(&self) -> DomainResult<Vec<Category>> {
        Ok(self.categories.list_by_title().await?)
    }

    /// Validate and persist a new product owned by `actor`.
    ///
    /// A supplied image is stored under the `products` namespace and the
    /// returned path recorded on the entity. Validation failure has no side
    /// effects; a failed image put aborts before the insert.
    pub async fn create(
        &self,
        draft: &ProductDraft,
        image: Option<&UploadedFile>,
        actor: UserId,
    ) -> DomainResult<Product> {
        let fields = self.validated(draft, image).await?;

        let image_path = match image {
            Some(file) => Some(
                self.store
                    .put(IMAGE_NAMESPACE, file)
                    .await
                    .map_err(|e| DomainError::storage(e.to_string()))?,
            ),
            None => None,
        };

        let product = Product::new(fields, image_path, actor);
        self.products.insert(&product).await?;
        tracing::info!(product_id = %product.id, owner = %actor, "product created");
        Ok(product)
    }

    /// One product with relations, plus up to [`RELATED_LIMIT`] others from
    /// the same category.
    pub async fn show(&self, id: ProductId) -> DomainResult<ProductView> {
        let detail = self
            .products
            .find_detailed(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        let related = self
            .products
            .find_by_category(detail.product.category_id, id, RELATED_LIMIT)
            .await?;
        Ok(ProductView { detail, related })
    }

    /// The product plus the full category list for the edit form.
    pub async fn edit(&self, id: ProductId) -> DomainResult<ProductEditForm> {
        let product = self.products.find(id).await?.ok_or(DomainError::NotFound)?;
        let categories = self.categories.list_by_title().await?;
        Ok(ProductEditForm {
            product,
            categories,
        })
    }

    /// Validate and persist changed fields; optionally replace the image.
    ///
    /// When a new image arrives and an old path exists, the old file is
    /// deleted *before* the new one is stored. The delete is best-effort: a
    /// failure is logged and the replacement proceeds. With no new image the
    /// existing reference is left untouched.
    pub async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
        image: Option<&UploadedFile>,
    ) -> DomainResult<Product> {
        let mut product = self.products.find(id).await?.ok_or(DomainError::NotFound)?;
        let fields = self.validated(draft, image).await?;

        if let Some(file) = image {
            if let Some(old) = product.image.take() {
                self.delete_best_effort(&old).await;
            }
            let path = self
                .store
                .put(IMAGE_NAMESPACE, file)
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?;
            product.image = Some(path);
        }

        product.apply(fields);
        self.products.update(&product).await?;
        tracing::info!(product_id = %product.id, "product updated");
        Ok(product)
    }

    /// Delete the product and, best-effort, its stored image.
    ///
    /// The file delete happens first and is not transactional with the
    /// record delete.
    pub async fn destroy(&self, id: ProductId) -> DomainResult<()> {
        let product = self.products.find(id).await?.ok_or(DomainError::NotFound)?;
        if let Some(path) = &product.image {
            self.delete_best_effort(path).await;
        }
        self.products.delete(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Full create/update validation: field rules, image rules, and the
    /// category existence check, reported together in one field-error map.
    async fn validated(
        &self,
        draft: &ProductDraft,
        image: Option<&UploadedFile>,
    ) -> DomainResult<ProductFields> {
        let mut check = Checker::new();
        let (title, description, price) = check_fields(&mut check, draft);

        let category_id = match draft.category_id {
            Some(id) => {
                if self.categories.exists(id).await? {
                    Some(id)
                } else {
                    check.reject("category_id", "selected category does not exist");
                    None
                }
            }
            None => {
                check.reject("category_id", "is required");
                None
            }
        };

        if let Some(file) = image {
            check_image(&mut check, file);
        }

        // Every None above came with a recorded error, so this rejection
        // always carries at least one message.
        let (Some(title), Some(price), Some(category_id)) = (title, price, category_id) else {
            return Err(DomainError::Validation(check.into_errors()));
        };

        check.finish(ProductFields {
            title,
            description,
            price,
            category_id,
        })
    }

    async fn delete_best_effort(&self, path: &str) {
        if let Err(err) = self.store.delete(path).await {
            tracing::warn!(path = %path, error = %err, "image delete failed, continuing");
        }
    }
}
