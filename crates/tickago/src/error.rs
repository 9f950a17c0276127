//! Error types for tickago operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickError {
    /// The input could not be resolved to a calendar instant.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The formatter configuration is malformed.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TickError>;
