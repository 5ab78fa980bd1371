//! Roles domain module.
//!
//! Role entities, draft validation, the repository seam, and the role
//! lifecycle service with its destroy-time guards (protected `admin` role,
//! roles with assigned users).

pub mod repository;
pub mod role;
pub mod service;

pub use repository::{RoleDetail, RoleRepository, RoleWithCount};
pub use role::{ADMIN_ROLE, Role, RoleDraft, RoleFields};
pub use service::RoleService;
