//! Postgres-backed repository implementations (sqlx, runtime queries).
//!
//! Expected schema (migrations are owned by the deployment, not this crate):
//!
//! ```sql
//! categories (id UUID PK, title TEXT NOT NULL)
//! users      (id UUID PK, name TEXT NOT NULL)
//! products   (id UUID PK, title TEXT NOT NULL, description TEXT,
//!             price NUMERIC(8,2) NOT NULL, image TEXT,
//!             category_id UUID NOT NULL REFERENCES categories(id),
//!             user_id UUID NOT NULL REFERENCES users(id),
//!             created_at TIMESTAMPTZ NOT NULL)
//! roles      (id UUID PK, name TEXT NOT NULL UNIQUE, description TEXT)
//! role_user  (role_id UUID REFERENCES roles(id),
//!             user_id UUID REFERENCES users(id),
//!             PRIMARY KEY (role_id, user_id))
//! ```
//!
//! Concurrent writers are last-writer-wins; no optimistic locking.

mod categories;
mod products;
mod roles;

pub use categories::PgCategoryRepository;
pub use products::PgProductRepository;
pub use roles::PgRoleRepository;

use shopadmin_core::RepositoryError;

pub(crate) fn backend(err: sqlx::Error) -> RepositoryError {
    RepositoryError::backend(err.to_string())
}
