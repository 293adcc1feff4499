//! Per-kind entity factories for billing
//!
//! Each factory converts the prepared [`CreationRequest`] into a typed
//! request record first, so validation failures name the offending field.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use core_kernel::factory::{CreationRequest, EntityFactory, EntityRef, Factory, FactoryBuilder, FactoryError};
use core_kernel::{CustomerId, PlanId, ResourceTypeId};

use crate::customer::{Customer, Plan, ResourceType};
use crate::target::Target;

/// Validated fields of a customer
#[derive(Debug, Clone)]
pub struct CustomerRequest {
    pub id: Option<CustomerId>,
    pub login: Option<String>,
    pub seller: Option<Arc<Customer>>,
}

impl TryFrom<&CreationRequest> for CustomerRequest {
    type Error = FactoryError;

    fn try_from(request: &CreationRequest) -> Result<Self, Self::Error> {
        let id = request.id()?.map(CustomerId::new);
        let login = request.text("login")?.filter(|login| !login.is_empty());
        if id.is_none() && login.is_none() {
            return Err(FactoryError::invalid_data(
                request.kind(),
                "customer needs an id or a login",
            ));
        }
        Ok(Self {
            id,
            login,
            seller: request.entity("seller")?,
        })
    }
}

/// Validated fields of a resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRequest {
    pub id: Option<ResourceTypeId>,
    pub name: String,
}

impl TryFrom<&CreationRequest> for TypeRequest {
    type Error = FactoryError;

    fn try_from(request: &CreationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: request.id()?.map(ResourceTypeId::new),
            name: request.require_text("name")?,
        })
    }
}

/// Validated fields of a plan
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub id: Option<PlanId>,
    pub name: String,
    pub seller: Option<Arc<Customer>>,
}

impl TryFrom<&CreationRequest> for PlanRequest {
    type Error = FactoryError;

    fn try_from(request: &CreationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: request.id()?.map(PlanId::new),
            name: request.require_text("name")?,
            seller: request.entity("seller")?,
        })
    }
}

/// Validated fields of a target
///
/// `type` arrives resolved as a [`ResourceType`]; the target keeps only its
/// name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRequest {
    pub id: Option<i64>,
    pub target_type: Option<String>,
    pub name: Option<String>,
}

impl TryFrom<&CreationRequest> for TargetRequest {
    type Error = FactoryError;

    fn try_from(request: &CreationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: request.id()?,
            target_type: request
                .entity::<ResourceType>("type")?
                .map(|resource_type| resource_type.name().to_string()),
            name: request.text("name")?,
        })
    }
}

pub struct CustomerFactory;

impl EntityFactory for CustomerFactory {
    fn create(&self, request: &CreationRequest) -> Result<EntityRef, FactoryError> {
        let fields = CustomerRequest::try_from(request)?;
        let mut customer = Customer::new(fields.id, fields.login);
        if let Some(seller) = fields.seller {
            customer = customer.with_seller(seller);
        }
        debug!(customer = %customer.unique_id(), "created customer");
        Ok(EntityRef::new(request.kind(), customer))
    }
}

pub struct TypeFactory;

impl EntityFactory for TypeFactory {
    fn create(&self, request: &CreationRequest) -> Result<EntityRef, FactoryError> {
        let fields = TypeRequest::try_from(request)?;
        Ok(EntityRef::new(request.kind(), ResourceType::new(fields.id, fields.name)))
    }
}

pub struct PlanFactory;

impl EntityFactory for PlanFactory {
    fn create(&self, request: &CreationRequest) -> Result<EntityRef, FactoryError> {
        let fields = PlanRequest::try_from(request)?;
        Ok(EntityRef::new(
            request.kind(),
            Plan::new(fields.id, fields.name, fields.seller),
        ))
    }
}

pub struct TargetFactory;

impl EntityFactory for TargetFactory {
    fn create(&self, request: &CreationRequest) -> Result<EntityRef, FactoryError> {
        let fields = TargetRequest::try_from(request)?;
        let mut target = Target::new(fields.target_type, fields.id);
        if let Some(name) = fields.name {
            target = target.with_name(name);
        }
        Ok(EntityRef::new(request.kind(), target))
    }
}

/// Billing defaults plus the customer, type, plan and target factories
pub fn billing_factory_builder() -> FactoryBuilder {
    Factory::builder()
        .with_factory("customer", CustomerFactory)
        .with_factory("type", TypeFactory)
        .with_factory("plan", PlanFactory)
        .with_factory("target", TargetFactory)
}

pub fn billing_factory() -> Factory {
    billing_factory_builder().build()
}

/// Typed getters for the billing kinds
pub trait BillingFactoryExt {
    fn customer(&mut self, data: &Value) -> Result<Arc<Customer>, FactoryError>;
    fn plan(&mut self, data: &Value) -> Result<Arc<Plan>, FactoryError>;
    fn resource_type(&mut self, data: &Value) -> Result<Arc<ResourceType>, FactoryError>;
    fn target(&mut self, data: &Value) -> Result<Arc<Target>, FactoryError>;
}

impl BillingFactoryExt for Factory {
    fn customer(&mut self, data: &Value) -> Result<Arc<Customer>, FactoryError> {
        self.resolve_as("customer", data)
    }

    fn plan(&mut self, data: &Value) -> Result<Arc<Plan>, FactoryError> {
        self.resolve_as("plan", data)
    }

    fn resource_type(&mut self, data: &Value) -> Result<Arc<ResourceType>, FactoryError> {
        self.resolve_as("type", data)
    }

    fn target(&mut self, data: &Value) -> Result<Arc<Target>, FactoryError> {
        self.resolve_as("target", data)
    }
}
