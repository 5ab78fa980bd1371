//! `shopadmin-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the domain error model, and the field
//! validation toolkit shared by the catalog and roles modules.

pub mod error;
pub mod id;
pub mod user;
pub mod validate;

pub use error::{DomainError, DomainResult, RepositoryError};
pub use id::{CategoryId, ProductId, RoleId, UserId};
pub use user::UserRef;
pub use validate::{Checker, FieldErrors};
