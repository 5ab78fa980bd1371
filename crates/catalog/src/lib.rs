//! Catalog domain module.
//!
//! Products and their categories: entities, draft validation, repository
//! seams, and the product lifecycle service that couples record mutations to
//! the image-file lifecycle on the public store.

pub mod category;
pub mod product;
pub mod repository;
pub mod service;

pub use category::Category;
pub use product::{MAX_IMAGE_KB, MAX_PRICE, Product, ProductDraft, ProductFields};
pub use repository::{
    CategoryRepository, ProductDetail, ProductPage, ProductRepository,
};
pub use service::{PAGE_SIZE, ProductEditForm, ProductService, ProductView, RELATED_LIMIT};
