//! Role entity and draft validation.

use serde::{Deserialize, Serialize};

use shopadmin_core::{Checker, RoleId};

/// Name of the protected role that can never be deleted.
pub const ADMIN_ROLE: &str = "admin";

/// An access-control role. Names are globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: Option<String>,
}

impl Role {
    pub fn new(fields: RoleFields) -> Self {
        Self {
            id: RoleId::new(),
            name: fields.name,
            description: fields.description,
        }
    }

    pub fn apply(&mut self, fields: RoleFields) {
        self.name = fields.name;
        self.description = fields.description;
    }

    /// Whether this is the undeletable `admin` role.
    pub fn is_protected(&self) -> bool {
        self.name == ADMIN_ROLE
    }
}

/// Unvalidated role input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    pub name: String,
    pub description: Option<String>,
}

/// Sanitized role fields. Uniqueness of the name is the service's part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleFields {
    pub name: String,
    pub description: Option<String>,
}

/// Repository-independent field rules: name required and ≤255 characters,
/// description optional and ≤500.
pub(crate) fn check_fields(check: &mut Checker, draft: &RoleDraft) -> Option<RoleFields> {
    let name = check.required_str("name", &draft.name, 255);
    let description = check.optional_str("description", draft.description.as_deref(), 500);
    Some(RoleFields {
        name: name?,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_protected_by_name() {
        let role = Role::new(RoleFields {
            name: ADMIN_ROLE.to_string(),
            description: None,
        });
        assert!(role.is_protected());

        let role = Role::new(RoleFields {
            name: "editor".to_string(),
            description: None,
        });
        assert!(!role.is_protected());
    }

    #[test]
    fn name_is_required() {
        let mut check = Checker::new();
        let fields = check_fields(&mut check, &RoleDraft::default());
        assert!(fields.is_none());
        assert_eq!(check.into_errors().get("name").unwrap(), ["is required"]);
    }

    #[test]
    fn description_longer_than_500_is_rejected() {
        let mut check = Checker::new();
        let draft = RoleDraft {
            name: "editor".to_string(),
            description: Some("d".repeat(501)),
        };
        check_fields(&mut check, &draft);
        assert!(check.into_errors().get("description").is_some());
    }
}
