//! Role lifecycle service.
//!
//! Plain CRUD plus the two destroy-time guards, which are the only
//! non-trivial control flow here: the `admin` role is never deletable, and a
//! role with assigned users must have them reassigned first.

use std::sync::Arc;

use shopadmin_core::{Checker, DomainError, DomainResult, RoleId};

use crate::repository::{RoleDetail, RoleRepository, RoleWithCount};
use crate::role::{Role, RoleDraft, RoleFields, check_fields};

pub struct RoleService<R> {
    roles: Arc<R>,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(roles: Arc<R>) -> Self {
        Self { roles }
    }

    /// All roles with their computed user counts.
    pub async fn list(&self) -> DomainResult<Vec<RoleWithCount>> {
        Ok(self.roles.list_with_counts().await?)
    }

    /// Validate and persist a new role.
    pub async fn create(&self, draft: &RoleDraft) -> DomainResult<Role> {
        let fields = self.validated(draft, None).await?;
        let role = Role::new(fields);
        self.roles.insert(&role).await?;
        tracing::info!(role_id = %role.id, name = %role.name, "role created");
        Ok(role)
    }

    /// One role with its associated users attached.
    pub async fn show(&self, id: RoleId) -> DomainResult<RoleDetail> {
        self.roles
            .find_detailed(id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// Validate and persist changed fields. The uniqueness check excludes the
    /// role's own record, so renaming a role to its current name succeeds.
    pub async fn update(&self, id: RoleId, draft: &RoleDraft) -> DomainResult<Role> {
        let mut role = self.roles.find(id).await?.ok_or(DomainError::NotFound)?;
        let fields = self.validated(draft, Some(id)).await?;
        role.apply(fields);
        self.roles.update(&role).await?;
        tracing::info!(role_id = %role.id, "role updated");
        Ok(role)
    }

    /// Delete the role unless a guard blocks it.
    ///
    /// Guards run before any mutation: the protected `admin` role is checked
    /// first (regardless of user count), then membership.
    pub async fn destroy(&self, id: RoleId) -> DomainResult<()> {
        let role = self.roles.find(id).await?.ok_or(DomainError::NotFound)?;

        if role.is_protected() {
            return Err(DomainError::guard("Cannot delete the admin role"));
        }
        if self.roles.user_count(id).await? > 0 {
            return Err(DomainError::guard(
                "Cannot delete a role with assigned users. Reassign the users first",
            ));
        }

        self.roles.delete(id).await?;
        tracing::info!(role_id = %id, name = %role.name, "role deleted");
        Ok(())
    }

    /// Field rules plus the global name uniqueness check, reported together.
    async fn validated(
        &self,
        draft: &RoleDraft,
        exclude: Option<RoleId>,
    ) -> DomainResult<RoleFields> {
        let mut check = Checker::new();
        let fields = check_fields(&mut check, draft);

        if let Some(fields) = &fields {
            if self.roles.name_taken(&fields.name, exclude).await? {
                check.reject("name", "has already been taken");
            }
        }

        let Some(fields) = fields else {
            return Err(DomainError::Validation(check.into_errors()));
        };
        check.finish(fields)
    }
}
