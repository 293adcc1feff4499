//! Generic entity factory
//!
//! Turns loosely-typed input (storage rows, API payloads, compact strings
//! such as `"10.00 USD"`) into shared entity instances, memoizing every
//! instance under its identifier and natural keys so that repeated
//! references to the same resource resolve to the same object.
//!
//! # Resolution
//!
//! 1. Scalar input is expanded into a field map ([`KeyExtractor::expand`]).
//! 2. Identifier and natural keys are derived ([`KeyExtractor::extract`]).
//! 3. The [`EntityRegistry`] is probed under those keys, identifier first.
//! 4. On a miss the [`EntityBuilder`] creates the entity, resolving nested
//!    fields (`seller`, `type`, `price`, ...) through the factory first.
//! 5. The instance is registered under every derived key.
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_kernel::factory::Factory;
//! use serde_json::json;
//!
//! let mut factory = Factory::builder()
//!     .with_factory("customer", CustomerFactory)
//!     .build();
//!
//! let a = factory.resolve("customer", &json!({"id": 7, "login": "alice"}))?;
//! let b = factory.resolve("customer", &json!("alice"))?;
//! assert!(a.ptr_eq(&b));
//! ```
//!
//! A factory is meant for sequential use within one session. Share it
//! across threads only behind an external lock.

pub mod builder;
pub mod config;
pub mod entity;
pub mod error;
pub mod keys;
pub mod registry;
pub mod request;
pub mod rules;
pub mod schema;

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

pub use builder::{Creator, EntityBuilder, EntityFactory, Preparation};
pub use config::FactoryConfig;
pub use entity::EntityRef;
pub use error::FactoryError;
pub use keys::{CacheKey, EntityKeys, KeyExtractor, RawData, ValueParser};
pub use registry::EntityRegistry;
pub use request::{CreationRequest, Field};
pub use rules::BuiltInRule;

use crate::money::Money;
use crate::quantity::{Quantity, Unit};

/// Resolves and memoizes entities by kind
pub struct Factory {
    keys: KeyExtractor,
    builder: Arc<EntityBuilder>,
    registry: EntityRegistry,
    config: FactoryConfig,
}

impl Factory {
    /// Starts from the default billing configuration
    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::new()
    }

    /// Returns the entity of `kind` described by `data`
    ///
    /// Calls whose data yields the same keys return the identical instance
    /// for the lifetime of this factory's registry.
    ///
    /// # Errors
    ///
    /// - `UnknownEntity` if `kind` has no unique-key schema
    /// - `FactoryNotFound` if `kind` has no creation rule
    /// - any error raised while resolving a nested field; nothing is
    ///   registered for the failing call
    #[instrument(level = "debug", skip(self, data))]
    pub fn resolve(&mut self, kind: &str, data: &Value) -> Result<EntityRef, FactoryError> {
        self.resolve_at(kind, data, 0)
    }

    /// Resolves and downcasts in one step
    pub fn resolve_as<T: Any + Send + Sync>(
        &mut self,
        kind: &str,
        data: &Value,
    ) -> Result<Arc<T>, FactoryError> {
        self.resolve(kind, data)?.downcast::<T>()
    }

    pub fn money(&mut self, data: &Value) -> Result<Arc<Money>, FactoryError> {
        self.resolve_as(BuiltInRule::Money.kind(), data)
    }

    pub fn quantity(&mut self, data: &Value) -> Result<Arc<Quantity>, FactoryError> {
        self.resolve_as(BuiltInRule::Quantity.kind(), data)
    }

    pub fn unit(&mut self, data: &Value) -> Result<Arc<Unit>, FactoryError> {
        self.resolve_as(BuiltInRule::Unit.kind(), data)
    }

    pub fn time(&mut self, data: &Value) -> Result<Arc<DateTime<Utc>>, FactoryError> {
        self.resolve_as(BuiltInRule::Time.kind(), data)
    }

    /// Derives the cache keys `data` would be looked up under
    pub fn keys_for(&self, kind: &str, data: &Value) -> Result<EntityKeys, FactoryError> {
        let fields = self.keys.expand(kind, data)?;
        self.keys.extract(kind, &fields)
    }

    pub fn knows(&self, kind: &str) -> bool {
        self.keys.knows(kind)
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Forgets every memoized entity
    pub fn reset(&mut self) {
        self.registry.clear();
    }

    fn resolve_at(&mut self, kind: &str, data: &Value, depth: usize) -> Result<EntityRef, FactoryError> {
        if depth > self.config.max_depth {
            return Err(FactoryError::RecursionLimit {
                kind: kind.to_string(),
                limit: self.config.max_depth,
            });
        }

        let fields = self.keys.expand(kind, data)?;
        let keys = self.keys.extract(kind, &fields)?.ordered();

        let entity = match self.registry.find(kind, &keys) {
            Some(found) => {
                debug!(kind, depth, "cache hit");
                found
            }
            None => {
                debug!(kind, depth, "cache miss, building");
                let builder = Arc::clone(&self.builder);
                builder.build(kind, fields, &mut |nested: &str, value: &Value| {
                    self.resolve_at(nested, value, depth + 1)
                })?
            }
        };

        self.registry.register(kind, &entity, &keys);
        Ok(entity)
    }
}

/// Builder for configuring a [`Factory`]
///
/// # Example
///
/// ```rust,ignore
/// let factory = FactoryBuilder::new()
///     .with_schema("invoice", ["number"])
///     .with_factory("invoice", InvoiceFactory)
///     .with_preparation("invoice", Preparation::entity("invoice"))
///     .build();
/// ```
pub struct FactoryBuilder {
    schemas: HashMap<String, Vec<String>>,
    parsers: HashMap<String, Arc<dyn ValueParser>>,
    creators: HashMap<String, Creator>,
    preparations: HashMap<String, Preparation>,
    config: FactoryConfig,
}

impl Default for FactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryBuilder {
    /// Billing defaults: unique-key schemas, nested field table, built-in
    /// rules and compact parsers for money and quantity
    pub fn new() -> Self {
        let mut builder = Self::empty().with_builtin_rules();
        builder.schemas = schema::default_unique_keys();
        builder.preparations = schema::default_preparations();
        builder
    }

    /// A builder that knows no kinds at all
    pub fn empty() -> Self {
        Self {
            schemas: HashMap::new(),
            parsers: HashMap::new(),
            creators: HashMap::new(),
            preparations: HashMap::new(),
            config: FactoryConfig::default(),
        }
    }

    /// Registers the money, quantity, unit and time rules
    pub fn with_builtin_rules(mut self) -> Self {
        for rule in BuiltInRule::ALL {
            self.creators
                .insert(rule.kind().to_string(), Creator::BuiltIn(rule));
        }
        self.with_parser(BuiltInRule::Money.kind(), rules::parse_money)
            .with_parser(BuiltInRule::Quantity.kind(), rules::parse_quantity)
    }

    /// Sets the unique-key schema of a kind, making the kind known
    pub fn with_schema<I, S>(mut self, kind: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemas
            .insert(kind.into(), fields.into_iter().map(Into::into).collect());
        self
    }

    /// Injects the factory for a kind, replacing any previous creator
    pub fn with_factory(self, kind: impl Into<String>, factory: impl EntityFactory + 'static) -> Self {
        self.with_shared_factory(kind, Arc::new(factory))
    }

    pub fn with_shared_factory(mut self, kind: impl Into<String>, factory: Arc<dyn EntityFactory>) -> Self {
        self.creators.insert(kind.into(), Creator::Injected(factory));
        self
    }

    pub fn with_parser(mut self, kind: impl Into<String>, parser: impl ValueParser + 'static) -> Self {
        self.parsers.insert(kind.into(), Arc::new(parser));
        self
    }

    pub fn with_preparation(mut self, field: impl Into<String>, preparation: Preparation) -> Self {
        self.preparations.insert(field.into(), preparation);
        self
    }

    pub fn with_config(mut self, config: FactoryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Factory {
        debug!(
            kinds = self.schemas.len(),
            creators = self.creators.len(),
            "building entity factory"
        );
        Factory {
            keys: KeyExtractor::new(self.schemas, self.parsers, self.config.key_separator.clone()),
            builder: Arc::new(EntityBuilder::new(self.creators, self.preparations)),
            registry: EntityRegistry::new(),
            config: self.config,
        }
    }
}
