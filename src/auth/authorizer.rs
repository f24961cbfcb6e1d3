use async_trait::async_trait;
use thiserror::Error;

use crate::{auth::middleware::AuthenticatedUser, entities::Role};

/// Roles allowed to moderate comments and see admin notifications.
pub const MODERATOR_ROLES: [Role; 2] = [Role::Admin, Role::Editor];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("role {0} is not permitted to perform this action")]
    Forbidden(Role),
}

/// Permission gate consulted before privileged reads and writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Succeeds when the current caller holds one of `roles`.
    async fn require_permission(&self, roles: &[Role]) -> Result<(), AuthzError>;
}

/// Authorizer for a single request, built from whatever caller the request
/// carried (if any).
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAuthorizer {
    role: Option<Role>,
}

impl RoleAuthorizer {
    pub fn anonymous() -> Self {
        Self { role: None }
    }

    pub fn for_user(user: &AuthenticatedUser) -> Self {
        Self {
            role: Some(user.role),
        }
    }

    pub fn from_caller(caller: Option<AuthenticatedUser>) -> Self {
        Self {
            role: caller.map(|u| u.role),
        }
    }
}

#[async_trait]
impl Authorizer for RoleAuthorizer {
    async fn require_permission(&self, roles: &[Role]) -> Result<(), AuthzError> {
        match self.role {
            None => Err(AuthzError::Unauthenticated),
            Some(role) if roles.contains(&role) => Ok(()),
            Some(role) => Err(AuthzError::Forbidden(role)),
        }
    }
}
