pub mod require_class_access;
pub mod require_jwt;
pub mod require_role;

pub use require_class_access::RequireClassAccess;
pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

pub(crate) use crate::models::create_error_response;
