//! Bills and their charges

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use core_kernel::{BillId, ChargeId, Money, Quantity};

use crate::customer::{Customer, Plan, ResourceType};
use crate::error::BillingError;
use crate::target::{Identity, Target};

/// Bill lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillState {
    New,
    Finished,
}

/// A single priced component of a bill
#[derive(Debug, Clone, Serialize)]
pub struct Charge {
    pub id: Option<ChargeId>,
    pub target: Target,
    pub sum: Money,
}

impl Charge {
    pub fn new(id: Option<ChargeId>, target: Target, sum: Money) -> Self {
        Self { id, target, sum }
    }
}

/// An amount owed by a customer for a quantity of some resource type
#[derive(Debug, Clone, Serialize)]
pub struct Bill {
    id: Option<BillId>,
    bill_type: Arc<ResourceType>,
    time: DateTime<Utc>,
    sum: Money,
    quantity: Quantity,
    customer: Arc<Customer>,
    target: Option<Target>,
    plan: Option<Arc<Plan>>,
    charges: Vec<Charge>,
    state: Option<BillState>,
    comment: Option<String>,
}

impl Bill {
    pub fn new(
        bill_type: Arc<ResourceType>,
        time: DateTime<Utc>,
        sum: Money,
        quantity: Quantity,
        customer: Arc<Customer>,
    ) -> Self {
        Self {
            id: None,
            bill_type,
            time,
            sum,
            quantity,
            customer,
            target: None,
            plan: None,
            charges: Vec::new(),
            state: None,
            comment: None,
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_plan(mut self, plan: Arc<Plan>) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn id(&self) -> Option<BillId> {
        self.id
    }

    /// Assigns the storage id once
    ///
    /// # Errors
    ///
    /// `CannotReassign` when a different id is already set.
    pub fn set_id(&mut self, id: BillId) -> Result<(), BillingError> {
        match self.id {
            Some(current) if current == id => Ok(()),
            Some(_) => Err(BillingError::CannotReassign("bill id".to_string())),
            None => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    pub fn bill_type(&self) -> &ResourceType {
        &self.bill_type
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn sum(&self) -> Money {
        self.sum
    }

    pub fn quantity(&self) -> &Quantity {
        &self.quantity
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_deref()
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    /// Replaces the (empty) charge list
    pub fn set_charges(&mut self, charges: Vec<Charge>) -> Result<(), BillingError> {
        if !self.charges.is_empty() {
            return Err(BillingError::CannotReassign("bill charges".to_string()));
        }
        self.charges = charges;
        Ok(())
    }

    /// Appends a charge; charges without an id never collide
    pub fn add_charge(&mut self, charge: Charge) -> Result<(), BillingError> {
        if let Some(id) = charge.id {
            if self.charges.iter().any(|c| c.id == Some(id)) {
                return Err(BillingError::ChargeOverlapping(id.to_string()));
            }
        }
        self.charges.push(charge);
        Ok(())
    }

    /// Key identifying the bill's business slot: one per currency, buyer,
    /// target, type and time
    pub fn unique_string(&self) -> String {
        [
            self.sum.currency().code().to_string(),
            self.customer.unique_id(),
            self.target.as_ref().map(Identity::uniq_id).unwrap_or_default(),
            self.bill_type.name().to_string(),
            self.time.to_rfc3339_opts(SecondsFormat::Secs, true),
        ]
        .join("-")
    }

    /// Price per unit of quantity; the plain sum when the quantity is zero
    pub fn calculate_price(&self) -> Money {
        self.sum
            .divide(self.quantity.value())
            .unwrap_or(self.sum)
    }

    /// `None` while the state is unknown
    pub fn is_finished(&self) -> Option<bool> {
        self.state.map(|state| state == BillState::Finished)
    }

    pub fn set_finished(&mut self) {
        self.state = Some(BillState::Finished);
    }

    pub fn set_state(&mut self, state: BillState) {
        self.state = Some(state);
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }
}
