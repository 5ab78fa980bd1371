//! In-memory user directory.
//!
//! Users live in an external identity system; repositories only need to
//! resolve an id to a display name when eager-loading. Unknown ids fall back
//! to the id's string form so a missing directory entry never breaks a read.

use std::collections::HashMap;
use std::sync::RwLock;

use shopadmin_core::{UserId, UserRef};

#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, String>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, id: UserId, name: impl Into<String>) {
        if let Ok(mut users) = self.users.write() {
            users.insert(id, name.into());
        }
    }

    pub fn user_ref(&self, id: UserId) -> UserRef {
        let name = self
            .users
            .read()
            .ok()
            .and_then(|users| users.get(&id).cloned())
            .unwrap_or_else(|| id.to_string());
        UserRef::new(id, name)
    }
}
