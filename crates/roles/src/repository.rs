//! Repository seam for roles and their user memberships.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use shopadmin_core::{RepositoryError, RoleId, UserRef};

use crate::role::Role;

/// Listing row: a role with the computed count of associated users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWithCount {
    pub role: Role,
    pub user_count: u64,
}

/// A role with its associated users eagerly attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDetail {
    pub role: Role,
    pub users: Vec<UserRef>,
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find(&self, id: RoleId) -> Result<Option<Role>, RepositoryError>;

    /// Fetch one role with its users attached.
    async fn find_detailed(&self, id: RoleId) -> Result<Option<RoleDetail>, RepositoryError>;

    /// All roles with user counts, ordered by name.
    async fn list_with_counts(&self) -> Result<Vec<RoleWithCount>, RepositoryError>;

    /// Whether `name` is taken by a role other than `exclude`.
    async fn name_taken(&self, name: &str, exclude: Option<RoleId>)
    -> Result<bool, RepositoryError>;

    async fn user_count(&self, id: RoleId) -> Result<u64, RepositoryError>;

    async fn insert(&self, role: &Role) -> Result<(), RepositoryError>;

    async fn update(&self, role: &Role) -> Result<(), RepositoryError>;

    async fn delete(&self, id: RoleId) -> Result<(), RepositoryError>;
}
