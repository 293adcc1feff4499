//! Core Kernel - Foundational types for the billing system
//!
//! This crate provides the building blocks shared by the billing domain:
//! - Money and Quantity value types with precise decimal arithmetic
//! - Integer identifiers for billing entities
//! - The generic entity factory that resolves and memoizes entities
//!   from loosely-typed input

pub mod money;
pub mod quantity;
pub mod identifiers;
pub mod factory;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use quantity::{Quantity, Unit, QuantityError};
pub use identifiers::{
    CustomerId, PlanId, ResourceTypeId, BillId, ChargeId, OrderId, ActionId,
};
pub use factory::{EntityRef, Factory, FactoryBuilder, FactoryConfig, FactoryError};
pub use error::CoreError;
