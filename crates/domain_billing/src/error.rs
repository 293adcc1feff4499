//! Billing domain errors

use thiserror::Error;

use core_kernel::FactoryError;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// An identity-bearing field was already set
    #[error("Cannot reassign {0}")]
    CannotReassign(String),

    /// A charge with the same id is already attached
    #[error("Cannot replace charge {0}")]
    ChargeOverlapping(String),

    /// A target set needs at least one member
    #[error("Target set must contain at least one target")]
    EmptyTargetSet,

    /// Entity resolution failed
    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),
}
