//! Bill and order tests

use chrono::Duration;
use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::{BillId, ChargeId, Currency, CustomerId, Money, Quantity};
use domain_billing::{Bill, BillingError, Charge, Customer, ResourceType, Target};
use test_utils::{TargetFixtures, ValueFixtures};

fn customer() -> Arc<Customer> {
    Arc::new(Customer::new(Some(CustomerId::new(7)), Some("alice".to_string())))
}

fn bill(quantity: &str) -> Bill {
    Bill::new(
        Arc::new(ResourceType::new(None, "monthly")),
        ValueFixtures::month_start(),
        ValueFixtures::usd_30(),
        Quantity::parse(quantity, "month").unwrap(),
        customer(),
    )
}

fn charge(id: Option<i64>, amount: rust_decimal::Decimal) -> Charge {
    Charge::new(
        id.map(ChargeId::new),
        TargetFixtures::server1(),
        Money::new(amount, Currency::USD),
    )
}

mod identity {
    use super::*;

    #[test]
    fn test_set_id_twice_with_same_value() {
        let mut bill = bill("1");
        assert!(bill.set_id(BillId::new(10)).is_ok());
        assert!(bill.set_id(BillId::new(10)).is_ok());
    }

    #[test]
    fn test_set_id_with_different_value_fails() {
        let mut bill = bill("1");
        bill.set_id(BillId::new(10)).unwrap();
        let err = bill.set_id(BillId::new(11)).unwrap_err();
        assert!(matches!(err, BillingError::CannotReassign(ref field) if field == "bill id"));
        assert_eq!(err.to_string(), "Cannot reassign bill id");
    }

    #[test]
    fn test_unique_string() {
        let targeted = bill("1").with_target(Target::of("server", 1));
        assert_eq!(targeted.unique_string(), "USD-alice-server:1-monthly-2024-03-01T00:00:00Z");

        let untargeted = bill("1");
        assert_eq!(untargeted.unique_string(), "USD-alice--monthly-2024-03-01T00:00:00Z");
    }

    #[test]
    fn test_unique_string_changes_with_time() {
        let a = bill("1");
        let b = Bill::new(
            Arc::new(ResourceType::new(None, "monthly")),
            ValueFixtures::month_start() + Duration::days(31),
            ValueFixtures::usd_30(),
            Quantity::parse("1", "month").unwrap(),
            customer(),
        );
        assert_ne!(a.unique_string(), b.unique_string());
    }
}

mod charges {
    use super::*;

    #[test]
    fn test_set_charges_once() {
        let mut bill = bill("1");
        bill.set_charges(vec![charge(Some(1), dec!(10))]).unwrap();
        assert!(matches!(
            bill.set_charges(vec![charge(Some(2), dec!(20))]),
            Err(BillingError::CannotReassign(_))
        ));
        assert_eq!(bill.charges().len(), 1);
    }

    #[test]
    fn test_set_charges_on_empty_list_is_allowed_repeatedly() {
        let mut bill = bill("1");
        bill.set_charges(Vec::new()).unwrap();
        bill.set_charges(vec![charge(None, dec!(5))]).unwrap();
        assert_eq!(bill.charges().len(), 1);
    }

    #[test]
    fn test_add_charge_rejects_duplicate_id() {
        let mut bill = bill("1");
        bill.add_charge(charge(Some(1), dec!(10))).unwrap();
        bill.add_charge(charge(Some(2), dec!(10))).unwrap();
        let err = bill.add_charge(charge(Some(1), dec!(99))).unwrap_err();
        assert!(matches!(err, BillingError::ChargeOverlapping(_)));
        assert_eq!(bill.charges().len(), 2);
        assert_eq!(bill.charges()[0].sum.amount(), dec!(10));
    }

    #[test]
    fn test_add_charge_without_id_always_appends() {
        let mut bill = bill("1");
        bill.add_charge(charge(None, dec!(1))).unwrap();
        bill.add_charge(charge(None, dec!(1))).unwrap();
        assert_eq!(bill.charges().len(), 2);
    }
}

mod pricing {
    use super::*;

    #[test]
    fn test_price_is_sum_per_unit() {
        assert_eq!(bill("3").calculate_price().amount(), dec!(10));
        assert_eq!(bill("4").calculate_price().amount(), dec!(7.5));
    }

    #[test]
    fn test_zero_quantity_returns_sum() {
        assert_eq!(bill("0").calculate_price(), ValueFixtures::usd_30());
    }

    #[test]
    fn test_comment_and_state() {
        let mut bill = bill("1");
        assert_eq!(bill.comment(), None);
        bill.set_comment("prorated");
        assert_eq!(bill.comment(), Some("prorated"));
        assert_eq!(bill.is_finished(), None);
        bill.set_finished();
        assert_eq!(bill.is_finished(), Some(true));
    }
}
