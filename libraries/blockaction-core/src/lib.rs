//! BlockAction Core
//!
//! Storage-agnostic domain types, traits, and error handling for the
//! BlockAction account service.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserId`, `UserState`
//! - **Core Traits**: `IdentityStore`, the narrow data-access contract the
//!   account use cases are written against
//! - **Id Generation**: `SnowflakeGenerator`, time-ordered 63-bit ids
//! - **Error Handling**: Unified `IdentityError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use blockaction_core::{SnowflakeGenerator, User};
//!
//! let ids = SnowflakeGenerator::new(1).unwrap();
//! let id = ids.next_id();
//!
//! let user = User::new_signup(id, "testuser", "Test User", "c0ffee", 1_700_000_000_000);
//! assert_eq!(user.creator, id);
//! assert_eq!(user.updater, id);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod snowflake;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{IdentityError, Result};
pub use snowflake::SnowflakeGenerator;
pub use storage::IdentityStore;
pub use types::{User, UserId, UserState};
