//! Billing targets
//!
//! A target names the real-world resource a bill, charge or price applies
//! to, as a `(type, id)` pair. Either part may be absent, turning the target
//! into a wildcard along that dimension:
//!
//! | type     | id   | meaning                      |
//! |----------|------|------------------------------|
//! | `server` | `1`  | one specific server          |
//! | `server` | none | any server                   |
//! | none     | none | anything                     |
//!
//! A [`TargetSet`] groups several targets into one reference and matches
//! through the union of its members' ids and types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::BillingError;
use crate::matching;

/// Common view of [`Target`] and [`TargetSet`] used by matching
pub trait Identity {
    /// Nominal identifier
    fn id(&self) -> Option<i64>;

    /// Nominal type
    fn target_type(&self) -> Option<&str>;

    /// Distinct concrete identifiers this descriptor covers
    fn ids(&self) -> Vec<i64>;

    /// Distinct concrete types this descriptor covers
    fn types(&self) -> Vec<&str>;

    /// `"<type>:<id>"`, absent parts rendered empty
    fn uniq_id(&self) -> String {
        format!(
            "{}:{}",
            self.target_type().unwrap_or_default(),
            self.id().map(|id| id.to_string()).unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    id: Option<i64>,
    #[serde(rename = "type")]
    target_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Target {
    pub fn new(target_type: Option<String>, id: Option<i64>) -> Self {
        Self {
            id,
            target_type,
            name: None,
        }
    }

    /// One specific resource
    pub fn of(target_type: impl Into<String>, id: i64) -> Self {
        Self::new(Some(target_type.into()), Some(id))
    }

    /// Any resource of the given type
    pub fn any_of(target_type: impl Into<String>) -> Self {
        Self::new(Some(target_type.into()), None)
    }

    /// Any resource at all
    pub fn any() -> Self {
        Self::new(None, None)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.id.is_none()
    }

    pub fn matches<O: Identity + ?Sized>(&self, other: &O) -> bool {
        matching::matches(self, other)
    }

    pub fn equals<O: Identity + ?Sized>(&self, other: &O) -> bool {
        matching::equals(self, other)
    }
}

impl Identity for Target {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }

    fn ids(&self) -> Vec<i64> {
        self.id.into_iter().collect()
    }

    fn types(&self) -> Vec<&str> {
        self.target_type.as_deref().into_iter().collect()
    }
}

// Names are descriptive only; identity is the (type, id) pair.
impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Target {}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uniq_id())
    }
}

/// An ordered, non-empty group of targets
#[derive(Debug, Clone, Serialize)]
pub struct TargetSet {
    targets: Vec<Target>,
    #[serde(skip)]
    ids: BTreeSet<i64>,
    #[serde(skip)]
    types: BTreeSet<String>,
}

impl TargetSet {
    /// Groups targets, deriving the distinct non-null ids and types
    ///
    /// # Errors
    ///
    /// `EmptyTargetSet` if `targets` is empty.
    pub fn new(targets: Vec<Target>) -> Result<Self, BillingError> {
        if targets.is_empty() {
            return Err(BillingError::EmptyTargetSet);
        }
        let ids = targets.iter().filter_map(|t| t.id).collect();
        let types = targets
            .iter()
            .filter_map(|t| t.target_type.clone())
            .collect();
        Ok(Self {
            targets,
            ids,
            types,
        })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// The member whose `(type, id)` stands for the whole set
    pub fn first(&self) -> &Target {
        &self.targets[0]
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn matches<O: Identity + ?Sized>(&self, other: &O) -> bool {
        matching::matches(self, other)
    }

    pub fn equals<O: Identity + ?Sized>(&self, other: &O) -> bool {
        matching::equals(self, other)
    }
}

impl Identity for TargetSet {
    fn id(&self) -> Option<i64> {
        self.first().id
    }

    fn target_type(&self) -> Option<&str> {
        self.first().target_type.as_deref()
    }

    fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }

    fn types(&self) -> Vec<&str> {
        self.types.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self.targets.iter().map(Target::uniq_id).collect();
        write!(f, "[{}]", members.join(", "))
    }
}
