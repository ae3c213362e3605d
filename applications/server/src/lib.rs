//! BlockAction Server Library
//!
//! Minimal account service: signup, signin, token refresh and personal info,
//! behind a bearer-token authorization gate.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::{cors_layer, create_router};
pub use services::{AccountService, SecretCodec, TokenService};
pub use state::AppState;
