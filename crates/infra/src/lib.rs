//! `shopadmin-infra` — repository implementations.
//!
//! Two backends behind the domain repository seams: in-memory maps for
//! tests/dev and Postgres (sqlx) for production. The domain crates never see
//! which one they are talking to.

pub mod memory;
pub mod postgres;


pub use memory::{
    InMemoryCategoryRepository, InMemoryProductRepository, InMemoryRoleRepository,
    InMemoryUserDirectory,
};
pub use postgres::{PgCategoryRepository, PgProductRepository, PgRoleRepository};
