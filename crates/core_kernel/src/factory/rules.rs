//! Built-in creation rules for primitive kinds
//!
//! Money, quantity, unit and time are built straight from raw field maps,
//! without a creation request or an injected factory.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::entity::EntityRef;
use super::error::FactoryError;
use super::keys::{scalar_text, RawData};
use crate::money::Money;
use crate::quantity::{Quantity, Unit};

/// The fixed set of primitive kinds the factory can build on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltInRule {
    Money,
    Quantity,
    Unit,
    Time,
}

impl BuiltInRule {
    pub const ALL: [BuiltInRule; 4] = [
        BuiltInRule::Money,
        BuiltInRule::Quantity,
        BuiltInRule::Unit,
        BuiltInRule::Time,
    ];

    /// The kind tag this rule is registered under
    pub fn kind(&self) -> &'static str {
        match self {
            BuiltInRule::Money => "money",
            BuiltInRule::Quantity => "quantity",
            BuiltInRule::Unit => "unit",
            BuiltInRule::Time => "time",
        }
    }

    pub fn create(&self, kind: &str, data: &RawData) -> Result<EntityRef, FactoryError> {
        let entity = match self {
            BuiltInRule::Money => EntityRef::new(
                kind,
                Money::parse(&required(kind, data, "amount")?, &required(kind, data, "currency")?)?,
            ),
            BuiltInRule::Quantity => EntityRef::new(
                kind,
                Quantity::parse(&required(kind, data, "quantity")?, &required(kind, data, "unit")?)?,
            ),
            BuiltInRule::Unit => EntityRef::new(kind, Unit::new(required(kind, data, "name")?)?),
            BuiltInRule::Time => {
                let raw = required(kind, data, "time")?;
                let time = parse_time(&raw)
                    .ok_or_else(|| FactoryError::invalid_field(kind, "time", format!("unparseable timestamp {:?}", raw)))?;
                EntityRef::new(kind, time)
            }
        };
        Ok(entity)
    }
}

/// Parses the compact `"<amount> <currency>"` form
pub fn parse_money(kind: &str, raw: &str) -> Result<RawData, FactoryError> {
    let (amount, currency) = split_pair(kind, raw)?;
    Ok(pair("amount", amount, "currency", currency))
}

/// Parses the compact `"<quantity> <unit>"` form
pub fn parse_quantity(kind: &str, raw: &str) -> Result<RawData, FactoryError> {
    let (quantity, unit) = split_pair(kind, raw)?;
    Ok(pair("quantity", quantity, "unit", unit))
}

/// Parses ISO-8601-like timestamps, treating zone-less values as UTC
pub fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(time.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
}

fn split_pair<'a>(kind: &str, raw: &'a str) -> Result<(&'a str, &'a str), FactoryError> {
    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(FactoryError::invalid_data(
            kind,
            format!("expected two space-separated parts, got {:?}", raw),
        )),
    }
}

fn pair(k1: &str, v1: &str, k2: &str, v2: &str) -> RawData {
    let mut map = RawData::new();
    map.insert(k1.to_string(), Value::String(v1.to_string()));
    map.insert(k2.to_string(), Value::String(v2.to_string()));
    map
}

fn required(kind: &str, data: &RawData, field: &str) -> Result<String, FactoryError> {
    data.get(field)
        .and_then(scalar_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FactoryError::invalid_field(kind, field, "is required"))
}
