/// Middleware modules
pub mod auth;
pub mod request_id;

pub use auth::{auth_middleware, AuthenticatedUser};
pub use request_id::SnowflakeRequestId;
