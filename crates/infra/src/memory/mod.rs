//! In-memory repository implementations.
//!
//! Intended for tests/dev. `RwLock<HashMap>` per table; a poisoned lock
//! surfaces as a backend failure rather than a panic.

mod categories;
mod products;
mod roles;
mod users;

pub use categories::InMemoryCategoryRepository;
pub use products::InMemoryProductRepository;
pub use roles::InMemoryRoleRepository;
pub use users::InMemoryUserDirectory;

use shopadmin_core::RepositoryError;

pub(crate) fn poisoned() -> RepositoryError {
    RepositoryError::backend("lock poisoned")
}
