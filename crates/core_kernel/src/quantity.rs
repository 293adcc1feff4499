//! Quantities of billable resources
//!
//! A quantity is a decimal amount tagged with a named unit (`"2 hour"`,
//! `"100 gb"`). Unit conversion is not performed: two quantities are only
//! comparable when their units share a name.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while building quantities
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unit name must not be empty")]
    EmptyUnit,
}

/// A named measurement unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit {
    name: String,
}

impl Unit {
    /// Creates a unit, rejecting blank names
    pub fn new(name: impl Into<String>) -> Result<Self, QuantityError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(QuantityError::EmptyUnit);
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A decimal amount of some unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantity {
    quantity: Decimal,
    unit: Unit,
}

impl Quantity {
    pub fn new(quantity: Decimal, unit: Unit) -> Self {
        Self { quantity, unit }
    }

    /// Parses the textual amount coming from a storage row
    pub fn parse(quantity: &str, unit: &str) -> Result<Self, QuantityError> {
        let value = Decimal::from_str(quantity.trim())
            .map_err(|_| QuantityError::InvalidQuantity(quantity.to_string()))?;
        Ok(Self::new(value, Unit::new(unit)?))
    }

    pub fn value(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn is_zero(&self) -> bool {
        self.quantity.is_zero()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_quantity() {
        let q = Quantity::parse("2.5", "hour").unwrap();
        assert_eq!(q.value(), dec!(2.5));
        assert_eq!(q.unit().name(), "hour");
        assert_eq!(q.to_string(), "2.5 hour");
    }

    #[test]
    fn test_blank_unit_is_rejected() {
        assert_eq!(Unit::new("  "), Err(QuantityError::EmptyUnit));
        assert_eq!(
            Quantity::parse("x", "hour"),
            Err(QuantityError::InvalidQuantity("x".to_string()))
        );
    }
}
