//! Billing Domain - Targets, Bills and Entity Factories
//!
//! This crate holds the billing entities and the rules for deciding which
//! resources a bill, charge or action applies to.
//!
//! # Targets and matching
//!
//! A [`Target`] is a `(type, id)` reference where either part may be left
//! open. [`TargetSet`] groups several targets into one reference. Matching
//! answers "could these denote a common resource?" and is implemented once
//! in [`matching`] for anything exposing an [`Identity`].
//!
//! # Entity resolution
//!
//! Billing rows refer to customers, plans, types and targets by id, by
//! natural key or by compact string. [`billing_factory`] returns a
//! [`core_kernel::Factory`] wired with the per-kind factories so that all
//! those references resolve to shared instances.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{billing_factory, BillingFactoryExt, Target};
//! use serde_json::json;
//!
//! let mut factory = billing_factory();
//! let server = factory.target(&json!({"id": 1, "type": "server"}))?;
//! assert!(server.matches(&Target::any_of("server")));
//! ```

pub mod bill;
pub mod customer;
pub mod error;
pub mod factories;
pub mod matching;
pub mod order;
pub mod target;

pub use bill::{Bill, BillState, Charge};
pub use customer::{Customer, Plan, ResourceType};
pub use error::BillingError;
pub use factories::{
    billing_factory, billing_factory_builder, BillingFactoryExt, CustomerFactory, CustomerRequest,
    PlanFactory, PlanRequest, TargetFactory, TargetRequest, TypeFactory, TypeRequest,
};
pub use order::{Action, Order};
pub use target::{Identity, Target, TargetSet};
