//! Lookup key extraction
//!
//! Every piece of raw entity data may yield up to two cache keys: an
//! identifier key (`id:<value>`) and a natural key (`unique:<values>`) built
//! from the kind's unique-key schema. The identifier key is always probed
//! first.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::FactoryError;

/// A field map as it comes from storage rows or API payloads
pub type RawData = Map<String, Value>;

/// Expands a compact scalar (`"10.00 USD"`) into a field map
pub trait ValueParser: Send + Sync {
    fn parse(&self, kind: &str, raw: &str) -> Result<RawData, FactoryError>;
}

impl<F> ValueParser for F
where
    F: Fn(&str, &str) -> Result<RawData, FactoryError> + Send + Sync,
{
    fn parse(&self, kind: &str, raw: &str) -> Result<RawData, FactoryError> {
        self(kind, raw)
    }
}

/// A registry key for one entity kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Id(String),
    Unique(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Id(value) => write!(f, "id:{}", value),
            CacheKey::Unique(value) => write!(f, "unique:{}", value),
        }
    }
}

/// The keys derivable from one piece of raw data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityKeys {
    pub id: Option<CacheKey>,
    pub unique: Option<CacheKey>,
}

impl EntityKeys {
    /// Keys in probe order: identifier first, then natural key
    pub fn ordered(&self) -> Vec<CacheKey> {
        self.id.iter().chain(self.unique.iter()).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.unique.is_none()
    }
}

/// Derives cache keys from raw data according to per-kind schemas
pub struct KeyExtractor {
    schemas: HashMap<String, Vec<String>>,
    parsers: HashMap<String, Arc<dyn ValueParser>>,
    separator: String,
}

impl KeyExtractor {
    pub fn new(
        schemas: HashMap<String, Vec<String>>,
        parsers: HashMap<String, Arc<dyn ValueParser>>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            schemas,
            parsers,
            separator: separator.into(),
        }
    }

    /// Returns the unique-key schema of a kind
    ///
    /// # Errors
    ///
    /// `UnknownEntity` when no schema is registered; an empty schema is valid.
    pub fn unique_fields(&self, kind: &str) -> Result<&[String], FactoryError> {
        self.schemas
            .get(kind)
            .map(Vec::as_slice)
            .ok_or_else(|| FactoryError::UnknownEntity(kind.to_string()))
    }

    pub fn knows(&self, kind: &str) -> bool {
        self.schemas.contains_key(kind)
    }

    /// Turns raw input into a field map
    ///
    /// Objects are taken as-is. Scalars go through the kind's parser when one
    /// is registered, otherwise they become the single unique field, or the
    /// identifier when the schema has zero or several fields.
    pub fn expand(&self, kind: &str, data: &Value) -> Result<RawData, FactoryError> {
        match data {
            Value::Object(map) => Ok(map.clone()),
            Value::Null => Ok(RawData::new()),
            Value::Array(_) => Err(FactoryError::invalid_data(
                kind,
                "expected a field map or a scalar, got a list",
            )),
            scalar => {
                let text = scalar_text(scalar).unwrap_or_default();
                if let Some(parser) = self.parsers.get(kind) {
                    return parser.parse(kind, &text);
                }
                let fields = self.unique_fields(kind)?;
                let field = match fields {
                    [only] => only.clone(),
                    _ => "id".to_string(),
                };
                let mut map = RawData::new();
                map.insert(field, scalar.clone());
                Ok(map)
            }
        }
    }

    /// Computes the identifier and natural keys for `data`
    ///
    /// The natural key is skipped entirely when the schema is empty or any of
    /// its fields is missing or blank.
    pub fn extract(&self, kind: &str, data: &RawData) -> Result<EntityKeys, FactoryError> {
        let fields = self.unique_fields(kind)?;

        let id = data
            .get("id")
            .filter(|value| !value.is_null())
            .map(|value| CacheKey::Id(key_text(value)));

        let unique = if fields.is_empty() {
            None
        } else {
            fields
                .iter()
                .map(|field| data.get(field).filter(|value| !is_blank(value)).map(key_text))
                .collect::<Option<Vec<_>>>()
                .map(|values| CacheKey::Unique(values.join(&self.separator)))
        };

        Ok(EntityKeys { id, unique })
    }
}

/// Renders a scalar the way it reads in compact input
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn key_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
