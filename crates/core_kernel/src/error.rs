//! Core error types used across the system

use thiserror::Error;
use crate::factory::FactoryError;
use crate::money::MoneyError;
use crate::quantity::QuantityError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Quantity error: {0}")]
    Quantity(#[from] QuantityError),

    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}
