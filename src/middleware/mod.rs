pub mod auth;
pub mod require_role;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use require_role::{require_admin, require_moderator};
