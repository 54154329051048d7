use thiserror::Error;

use crate::errors::domain::DomainError;

/// Process-boundary error type returned by bootstrap code and the driver.
///
/// Game and store failures stay `DomainError` inside the engine; they are
/// wrapped here only when they cross into startup/shutdown code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}
