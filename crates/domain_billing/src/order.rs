//! Orders: a customer's batch of billable actions

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use core_kernel::{ActionId, OrderId, Quantity};

use crate::customer::{Customer, ResourceType};
use crate::target::{Identity, Target};

/// One billable operation on a target
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    pub id: Option<ActionId>,
    pub action_type: Arc<ResourceType>,
    pub target: Target,
    pub quantity: Quantity,
    pub time: DateTime<Utc>,
}

impl Action {
    pub fn new(
        action_type: Arc<ResourceType>,
        target: Target,
        quantity: Quantity,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            action_type,
            target,
            quantity,
            time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    id: Option<OrderId>,
    customer: Arc<Customer>,
    actions: BTreeMap<String, Action>,
}

impl Order {
    pub fn new(id: Option<OrderId>, customer: Arc<Customer>) -> Self {
        Self {
            id,
            customer,
            actions: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Adds an action under `key`, returning the one it replaced
    pub fn insert_action(&mut self, key: impl Into<String>, action: Action) -> Option<Action> {
        self.actions.insert(key.into(), action)
    }

    pub fn actions(&self) -> &BTreeMap<String, Action> {
        &self.actions
    }

    /// Actions whose target matches `target`, in key order
    pub fn actions_for<'a, I>(&'a self, target: &'a I) -> impl Iterator<Item = (&'a str, &'a Action)> + 'a
    where
        I: Identity + ?Sized,
    {
        self.actions
            .iter()
            .filter(move |(_, action)| action.target.matches(target))
            .map(|(key, action)| (key.as_str(), action))
    }
}
