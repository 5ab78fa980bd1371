//! User reference read model.
//!
//! Users are owned by an external identity system. The domain only ever
//! references them: products carry an owner id, roles carry memberships.
//! `UserRef` is the slice of a user that eager-loading attaches to a result.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Lightweight user projection attached to eagerly-loaded results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}

impl UserRef {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
