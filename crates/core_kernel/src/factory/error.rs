//! Entity factory errors

use thiserror::Error;

use crate::money::MoneyError;
use crate::quantity::QuantityError;

/// Errors raised while resolving entities through the [`Factory`](super::Factory)
///
/// All variants are configuration or input errors. None of them is retried
/// internally; a failing nested resolution aborts the whole call.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The kind has no unique-key schema registered
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// The kind has a schema but neither a built-in rule nor an injected factory
    #[error("Factory not found for entity: {0}")]
    FactoryNotFound(String),

    /// Raw input that cannot be turned into a field map
    #[error("Invalid {kind} data: {message}")]
    InvalidData {
        kind: String,
        message: String,
    },

    /// A creation request field failed validation
    #[error("Invalid {kind}.{field}: {message}")]
    InvalidField {
        kind: String,
        field: String,
        message: String,
    },

    /// A resolved entity is not of the requested Rust type
    #[error("Entity of kind {kind} is not a {expected}")]
    UnexpectedEntity {
        kind: String,
        expected: &'static str,
    },

    /// Nested resolution went deeper than the configured limit
    #[error("Nested resolution of {kind} exceeded depth {limit}")]
    RecursionLimit {
        kind: String,
        limit: usize,
    },

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Quantity error: {0}")]
    Quantity(#[from] QuantityError),
}

impl FactoryError {
    pub fn invalid_data(kind: impl Into<String>, message: impl Into<String>) -> Self {
        FactoryError::InvalidData {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn invalid_field(
        kind: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        FactoryError::InvalidField {
            kind: kind.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the kind this error is about, when it names one
    pub fn kind(&self) -> Option<&str> {
        match self {
            FactoryError::UnknownEntity(kind) | FactoryError::FactoryNotFound(kind) => Some(kind),
            FactoryError::InvalidData { kind, .. }
            | FactoryError::InvalidField { kind, .. }
            | FactoryError::UnexpectedEntity { kind, .. }
            | FactoryError::RecursionLimit { kind, .. } => Some(kind),
            FactoryError::Money(_) | FactoryError::Quantity(_) => None,
        }
    }
}
