//! In-memory role repository with user memberships.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use shopadmin_core::{RepositoryError, RoleId, UserId};
use shopadmin_roles::{Role, RoleDetail, RoleRepository, RoleWithCount};

use super::InMemoryUserDirectory;
use super::poisoned;

#[derive(Debug)]
pub struct InMemoryRoleRepository {
    rows: RwLock<HashMap<RoleId, Role>>,
    members: RwLock<HashMap<RoleId, Vec<UserId>>>,
    users: Arc<InMemoryUserDirectory>,
}

impl InMemoryRoleRepository {
    pub fn new(users: Arc<InMemoryUserDirectory>) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            members: RwLock::new(HashMap::new()),
            users,
        }
    }

    /// Assign a user to a role. Membership management proper lives outside
    /// this core; tests use this to set up in-use roles.
    pub fn assign_user(&self, role: RoleId, user: UserId) {
        if let Ok(mut members) = self.members.write() {
            members.entry(role).or_default().push(user);
        }
    }

    fn members_of(&self, role: RoleId) -> Result<Vec<UserId>, RepositoryError> {
        let members = self.members.read().map_err(|_| poisoned())?;
        Ok(members.get(&role).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find(&self, id: RoleId) -> Result<Option<Role>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(&id).cloned())
    }

    async fn find_detailed(&self, id: RoleId) -> Result<Option<RoleDetail>, RepositoryError> {
        let role = {
            let rows = self.rows.read().map_err(|_| poisoned())?;
            rows.get(&id).cloned()
        };
        let Some(role) = role else {
            return Ok(None);
        };
        let users = self
            .members_of(id)?
            .into_iter()
            .map(|user| self.users.user_ref(user))
            .collect();
        Ok(Some(RoleDetail { role, users }))
    }

    async fn list_with_counts(&self) -> Result<Vec<RoleWithCount>, RepositoryError> {
        let roles: Vec<Role> = {
            let rows = self.rows.read().map_err(|_| poisoned())?;
            rows.values().cloned().collect()
        };
        let mut listed = Vec::with_capacity(roles.len());
        for role in roles {
            let user_count = self.members_of(role.id)?.len() as u64;
            listed.push(RoleWithCount { role, user_count });
        }
        listed.sort_by(|a, b| a.role.name.cmp(&b.role.name));
        Ok(listed)
    }

    async fn name_taken(
        &self,
        name: &str,
        exclude: Option<RoleId>,
    ) -> Result<bool, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows
            .values()
            .any(|role| role.name == name && exclude != Some(role.id)))
    }

    async fn user_count(&self, id: RoleId) -> Result<u64, RepositoryError> {
        Ok(self.members_of(id)?.len() as u64)
    }

    async fn insert(&self, role: &Role) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(role.id, role.clone());
        Ok(())
    }

    async fn update(&self, role: &Role) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(role.id, role.clone());
        Ok(())
    }

    async fn delete(&self, id: RoleId) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.remove(&id);
        let mut members = self.members.write().map_err(|_| poisoned())?;
        members.remove(&id);
        Ok(())
    }
}
