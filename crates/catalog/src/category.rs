//! Category entity.

use serde::{Deserialize, Serialize};

use shopadmin_core::CategoryId;

/// A product category. Products reference it by id; listings order by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
}

impl Category {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            title: title.into(),
        }
    }
}
