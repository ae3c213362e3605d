/// Input validation shared by the HTTP and CLI entry points
use crate::error::{Result, ServerError};

/// Field-level checks run before any side effect
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Lengths are counted in characters, not bytes
pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ServerError::Validation(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

pub fn check_present(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ServerError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
