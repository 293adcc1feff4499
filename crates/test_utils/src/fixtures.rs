//! Pre-built Test Fixtures
//!
//! Provides ready-to-use targets and raw entity rows. The target fixtures
//! form the reference matching grid: two ids (1 and 2) across two types
//! (`server` and `domain`), plus wildcards and sets.

use chrono::{DateTime, TimeZone, Utc};
use fake::faker::internet::en::Username;
use fake::Fake;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{Currency, Money};
use domain_billing::{Target, TargetSet};

/// Fixture for the target matching grid
pub struct TargetFixtures;

impl TargetFixtures {
    pub const ID1: i64 = 1;
    pub const ID2: i64 = 2;

    /// Matches anything
    pub fn atarget() -> Target {
        Target::any()
    }

    /// Any server
    pub fn aserver() -> Target {
        Target::any_of("server")
    }

    pub fn server1() -> Target {
        Target::of("server", Self::ID1)
    }

    pub fn server2() -> Target {
        Target::of("server", Self::ID2)
    }

    pub fn servers() -> TargetSet {
        TargetSet::new(vec![Self::server1(), Self::server2()])
            .expect("fixture set is non-empty")
    }

    /// Any domain
    pub fn adomain() -> Target {
        Target::any_of("domain")
    }

    pub fn domain1() -> Target {
        Target::of("domain", Self::ID1)
    }

    pub fn domain2() -> Target {
        Target::of("domain", Self::ID2)
    }

    pub fn domains() -> TargetSet {
        TargetSet::new(vec![Self::domain1(), Self::domain2()])
            .expect("fixture set is non-empty")
    }
}

/// Fixture for raw entity data as it comes from storage rows
pub struct RawDataFixtures;

impl RawDataFixtures {
    /// A customer row with a generated login
    pub fn customer(id: i64) -> Value {
        let login: String = Username().fake();
        json!({"id": id, "login": login})
    }

    /// A customer row sold through `seller`
    pub fn customer_with_seller(id: i64, login: &str, seller: &str) -> Value {
        json!({"id": id, "login": login, "seller": seller})
    }

    pub fn plan(id: i64, name: &str, seller: &str) -> Value {
        json!({"id": id, "name": name, "seller": seller})
    }

    pub fn target(id: i64, target_type: &str) -> Value {
        json!({"id": id, "type": target_type})
    }

    pub fn money(amount: &str, currency: &str) -> Value {
        json!({"amount": amount, "currency": currency})
    }
}

/// Fixture for money and time values
pub struct ValueFixtures;

impl ValueFixtures {
    pub fn usd_30() -> Money {
        Money::new(dec!(30.00), Currency::USD)
    }

    /// Start of the reference billing month (Mar 1, 2024)
    pub fn month_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_customer_has_login() {
        let row = RawDataFixtures::customer(9);
        assert_eq!(row["id"], json!(9));
        assert!(row["login"].as_str().is_some_and(|login| !login.is_empty()));
    }
}
