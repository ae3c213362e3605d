/// API route modules
pub mod account;
pub mod extract;
pub mod health;
pub mod user;

use serde::Serialize;

/// Success envelope, `{"result": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

impl<T> ApiResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}
