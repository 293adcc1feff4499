//! Customers, plans and resource types
//!
//! These are the reference entities bills and orders point at. They are
//! normally created through the entity factory so that every row naming the
//! same customer shares one instance.

use serde::Serialize;
use std::sync::Arc;

use core_kernel::{CustomerId, PlanId, ResourceTypeId};

/// A customer, optionally sold to by a reseller customer
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    id: Option<CustomerId>,
    login: Option<String>,
    seller: Option<Arc<Customer>>,
}

impl Customer {
    pub fn new(id: Option<CustomerId>, login: Option<String>) -> Self {
        Self {
            id,
            login,
            seller: None,
        }
    }

    pub fn with_seller(mut self, seller: Arc<Customer>) -> Self {
        self.seller = Some(seller);
        self
    }

    pub fn id(&self) -> Option<CustomerId> {
        self.id
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn seller(&self) -> Option<&Arc<Customer>> {
        self.seller.as_ref()
    }

    /// Login when known, otherwise the integer id
    pub fn unique_id(&self) -> String {
        match (&self.login, self.id) {
            (Some(login), _) => login.clone(),
            (None, Some(id)) => id.value().to_string(),
            (None, None) => String::new(),
        }
    }
}

/// A category of billable resource or operation (`server`, `monthly`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceType {
    id: Option<ResourceTypeId>,
    name: String,
}

impl ResourceType {
    pub fn new(id: Option<ResourceTypeId>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Option<ResourceTypeId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unique_id(&self) -> &str {
        &self.name
    }
}

/// A tariff plan published by a seller
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    id: Option<PlanId>,
    name: String,
    seller: Option<Arc<Customer>>,
}

impl Plan {
    pub fn new(id: Option<PlanId>, name: impl Into<String>, seller: Option<Arc<Customer>>) -> Self {
        Self {
            id,
            name: name.into(),
            seller,
        }
    }

    pub fn id(&self) -> Option<PlanId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seller(&self) -> Option<&Arc<Customer>> {
        self.seller.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_unique_id_prefers_login() {
        let both = Customer::new(Some(CustomerId::new(3)), Some("alice".to_string()));
        assert_eq!(both.unique_id(), "alice");

        let id_only = Customer::new(Some(CustomerId::new(3)), None);
        assert_eq!(id_only.unique_id(), "3");
    }

    #[test]
    fn test_plan_keeps_seller() {
        let seller = Arc::new(Customer::new(None, Some("reseller".to_string())));
        let plan = Plan::new(None, "basic", Some(Arc::clone(&seller)));
        assert!(Arc::ptr_eq(plan.seller().unwrap(), &seller));
    }
}
