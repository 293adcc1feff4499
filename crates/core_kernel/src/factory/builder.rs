//! Entity construction
//!
//! Each kind maps to exactly one [`Creator`]: a built-in rule or an injected
//! per-kind factory. The mapping is fixed when the factory is built.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use super::entity::EntityRef;
use super::error::FactoryError;
use super::keys::RawData;
use super::request::{CreationRequest, Field};
use super::rules::BuiltInRule;
use crate::money::Currency;

/// Builds entities of one kind from a prepared creation request
pub trait EntityFactory: Send + Sync {
    fn create(&self, request: &CreationRequest) -> Result<EntityRef, FactoryError>;
}

impl<F> EntityFactory for F
where
    F: Fn(&CreationRequest) -> Result<EntityRef, FactoryError> + Send + Sync,
{
    fn create(&self, request: &CreationRequest) -> Result<EntityRef, FactoryError> {
        self(request)
    }
}

/// How entities of a kind are created
#[derive(Clone)]
pub enum Creator {
    BuiltIn(BuiltInRule),
    Injected(Arc<dyn EntityFactory>),
}

impl fmt::Debug for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Creator::BuiltIn(rule) => f.debug_tuple("BuiltIn").field(rule).finish(),
            Creator::Injected(_) => f.write_str("Injected(..)"),
        }
    }
}

/// How a named input field is prepared before it reaches a per-kind factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preparation {
    /// Resolve the raw value through the factory as an entity of this kind
    Entity(String),
    /// Parse a currency code in place; currencies are not memoized
    Currency,
}

impl Preparation {
    pub fn entity(kind: impl Into<String>) -> Self {
        Preparation::Entity(kind.into())
    }
}

/// Callback used to resolve nested fields through the owning factory
pub type NestedResolver<'a> = dyn FnMut(&str, &Value) -> Result<EntityRef, FactoryError> + 'a;

#[derive(Debug, Default)]
pub struct EntityBuilder {
    creators: HashMap<String, Creator>,
    preparations: HashMap<String, Preparation>,
}

impl EntityBuilder {
    pub fn new(
        creators: HashMap<String, Creator>,
        preparations: HashMap<String, Preparation>,
    ) -> Self {
        Self {
            creators,
            preparations,
        }
    }

    pub fn creator(&self, kind: &str) -> Option<&Creator> {
        self.creators.get(kind)
    }

    /// Builds an entity of `kind` from a field map
    ///
    /// Built-in kinds are created directly from `data`. Other kinds get a
    /// creation request whose nested fields are resolved through `resolve`
    /// first, so entity graphs are assembled bottom-up.
    ///
    /// # Errors
    ///
    /// `FactoryNotFound` when the kind has no creator. Any nested resolution
    /// failure is returned unchanged.
    pub fn build(
        &self,
        kind: &str,
        data: RawData,
        resolve: &mut NestedResolver<'_>,
    ) -> Result<EntityRef, FactoryError> {
        match self.creators.get(kind) {
            Some(Creator::BuiltIn(rule)) => rule.create(kind, &data),
            Some(Creator::Injected(factory)) => {
                let request = self.prepare(kind, data, resolve)?;
                factory.create(&request)
            }
            None => Err(FactoryError::FactoryNotFound(kind.to_string())),
        }
    }

    fn prepare(
        &self,
        kind: &str,
        data: RawData,
        resolve: &mut NestedResolver<'_>,
    ) -> Result<CreationRequest, FactoryError> {
        let mut request = CreationRequest::new(kind);
        for (name, value) in data {
            let field = match self.preparations.get(&name) {
                _ if value.is_null() => Field::Value(value),
                Some(Preparation::Entity(nested)) => {
                    trace!(kind, field = %name, nested = %nested, "resolving nested field");
                    Field::Entity(resolve(nested.as_str(), &value)?)
                }
                Some(Preparation::Currency) => Field::Currency(currency_of(kind, &name, &value)?),
                None => Field::Value(value),
            };
            request.insert(name, field);
        }
        Ok(request)
    }
}

fn currency_of(kind: &str, name: &str, value: &Value) -> Result<Currency, FactoryError> {
    value
        .as_str()
        .ok_or_else(|| FactoryError::invalid_field(kind, name, "expected a currency code"))?
        .parse()
        .map_err(FactoryError::from)
}
