//! Creation requests handed to per-kind factories

use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::entity::EntityRef;
use super::error::FactoryError;
use super::keys::scalar_text;
use crate::money::Currency;

/// One prepared field of a creation request
#[derive(Debug, Clone)]
pub enum Field {
    /// Copied from the input untouched
    Value(Value),
    /// Resolved through the factory as a nested entity
    Entity(EntityRef),
    Currency(Currency),
}

/// The fully prepared field record for one entity
///
/// Nested references are already resolved when a per-kind factory sees the
/// request. Accessors validate as they read, so a factory can turn the
/// request into its own typed record with a handful of `?`s.
#[derive(Debug, Clone)]
pub struct CreationRequest {
    kind: String,
    fields: BTreeMap<String, Field>,
}

impl CreationRequest {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.insert(name, field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: Field) {
        self.fields.insert(name.into(), field);
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Reads the integer identifier, accepting numeric strings
    pub fn id(&self) -> Result<Option<i64>, FactoryError> {
        self.integer("id")
    }

    pub fn integer(&self, name: &str) -> Result<Option<i64>, FactoryError> {
        match self.present(name) {
            None => Ok(None),
            Some(Field::Value(Value::Number(n))) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.invalid(name, "expected an integer")),
            Some(Field::Value(Value::String(s))) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(name, format!("expected an integer, got {:?}", s))),
            Some(_) => Err(self.invalid(name, "expected an integer")),
        }
    }

    /// Reads a scalar field as text
    pub fn text(&self, name: &str) -> Result<Option<String>, FactoryError> {
        match self.present(name) {
            None => Ok(None),
            Some(Field::Value(value)) => scalar_text(value)
                .map(Some)
                .ok_or_else(|| self.invalid(name, "expected a scalar")),
            Some(Field::Currency(currency)) => Ok(Some(currency.code().to_string())),
            Some(Field::Entity(_)) => Err(self.invalid(name, "expected a scalar, got an entity")),
        }
    }

    pub fn require_text(&self, name: &str) -> Result<String, FactoryError> {
        self.text(name)?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| self.invalid(name, "is required"))
    }

    /// Reads a nested entity resolved during preparation
    pub fn entity<T: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<T>>, FactoryError> {
        match self.present(name) {
            None => Ok(None),
            Some(Field::Entity(entity)) => entity
                .downcast::<T>()
                .map(Some)
                .map_err(|_| self.invalid(name, format!("expected {}", std::any::type_name::<T>()))),
            Some(_) => Err(self.invalid(name, "expected a resolved entity")),
        }
    }

    pub fn require_entity<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, FactoryError> {
        self.entity(name)?.ok_or_else(|| self.invalid(name, "is required"))
    }

    pub fn currency(&self, name: &str) -> Result<Option<Currency>, FactoryError> {
        match self.present(name) {
            None => Ok(None),
            Some(Field::Currency(currency)) => Ok(Some(*currency)),
            Some(Field::Value(Value::String(code))) => Ok(Some(code.parse()?)),
            Some(_) => Err(self.invalid(name, "expected a currency code")),
        }
    }

    // Null values count as absent
    fn present(&self, name: &str) -> Option<&Field> {
        match self.fields.get(name) {
            Some(Field::Value(Value::Null)) | None => None,
            other => other,
        }
    }

    fn invalid(&self, name: &str, message: impl Into<String>) -> FactoryError {
        FactoryError::invalid_field(&self.kind, name, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> CreationRequest {
        CreationRequest::new("customer")
            .with_field("id", Field::Value(json!("17")))
            .with_field("login", Field::Value(json!("alice")))
            .with_field("comment", Field::Value(Value::Null))
            .with_field("currency", Field::Currency(Currency::EUR))
            .with_field("seller", Field::Entity(EntityRef::new("customer", 5_i64)))
    }

    #[test]
    fn test_scalar_accessors() {
        let req = request();
        assert_eq!(req.id().unwrap(), Some(17));
        assert_eq!(req.require_text("login").unwrap(), "alice");
        assert_eq!(req.text("comment").unwrap(), None);
        assert_eq!(req.currency("currency").unwrap(), Some(Currency::EUR));
    }

    #[test]
    fn test_entity_accessors() {
        let req = request();
        assert_eq!(*req.require_entity::<i64>("seller").unwrap(), 5);
        assert!(req.entity::<String>("seller").is_err());
        assert!(req.entity::<i64>("login").is_err());
        assert!(req.entity::<i64>("missing").unwrap().is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let err = request().require_text("email").unwrap_err();
        assert_eq!(err.to_string(), "Invalid customer.email: is required");
    }

    #[test]
    fn test_non_integer_id() {
        let req = CreationRequest::new("plan").with_field("id", Field::Value(json!("abc")));
        assert!(matches!(req.id(), Err(FactoryError::InvalidField { .. })));
    }
}
