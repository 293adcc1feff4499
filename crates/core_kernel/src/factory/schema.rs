//! Default billing configuration for the factory

use std::collections::HashMap;

use super::builder::Preparation;

/// Unique-key schema per kind
///
/// An empty list means the kind is known but only memoized by identifier.
pub const UNIQUE_KEYS: &[(&str, &[&str])] = &[
    ("customer", &["login"]),
    ("type", &["name"]),
    ("plan", &["name", "seller"]),
    ("sale", &[]),
    ("action", &[]),
    ("price", &[]),
    ("target", &["type", "name"]),
    ("money", &["amount", "currency"]),
    ("time", &["time"]),
    ("unit", &["name"]),
    ("quantity", &["quantity", "unit"]),
];

/// Fields resolved as nested entities before creation, and the kind they resolve to
pub const NESTED_FIELDS: &[(&str, &str)] = &[
    ("seller", "customer"),
    ("customer", "customer"),
    ("plan", "plan"),
    ("sale", "sale"),
    ("type", "type"),
    ("target", "target"),
    ("price", "money"),
    ("prepaid", "quantity"),
    ("quantity", "quantity"),
    ("unit", "unit"),
    ("time", "time"),
];

pub fn default_unique_keys() -> HashMap<String, Vec<String>> {
    UNIQUE_KEYS
        .iter()
        .map(|(kind, fields)| {
            (
                kind.to_string(),
                fields.iter().map(|f| f.to_string()).collect(),
            )
        })
        .collect()
}

pub fn default_preparations() -> HashMap<String, Preparation> {
    NESTED_FIELDS
        .iter()
        .map(|(field, kind)| (field.to_string(), Preparation::entity(*kind)))
        .chain(std::iter::once(("currency".to_string(), Preparation::Currency)))
        .collect()
}
