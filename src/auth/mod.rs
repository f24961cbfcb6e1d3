pub mod authorizer;
pub mod dtos;
pub mod jwt;
pub mod middleware;

pub use authorizer::{Authorizer, AuthzError, MODERATOR_ROLES, RoleAuthorizer};
pub use middleware::{AuthError, AuthenticatedUser};
