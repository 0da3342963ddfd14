//! Cookie-based JWT authentication.

pub mod jwt;
pub mod middleware;
pub mod routes;

pub use middleware::{AuthUser, CurrentUser};
pub use routes::routes;

/// Name of the private cookie carrying the JWT
pub const AUTH_COOKIE: &str = "auth_token";
