//! Unit tests for the Money and Quantity value types
//!
//! Tests cover parsing of storage values, currency handling and the compact
//! display form consumed by the entity factory.

use core_kernel::{Currency, Money, MoneyError, Quantity, QuantityError, Unit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::USD);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_parse_negative_amount() {
        let m = Money::parse("-5.50", "UAH").unwrap();
        assert!(m.is_negative());
        assert_eq!(m.amount(), dec!(-5.50));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let m = Money::parse(" 7 ", " gbp ").unwrap();
        assert_eq!(m, Money::new(dec!(7), Currency::GBP));
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_code_round_trips_through_from_str() {
        for currency in [Currency::USD, Currency::EUR, Currency::JPY, Currency::UAH, Currency::PLN] {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(
            "BTC".parse::<Currency>(),
            Err(MoneyError::UnknownCurrency("BTC".to_string()))
        );
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(Currency::JPY.decimal_places(), 0);
        assert_eq!(Currency::USD.decimal_places(), 2);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::new(dec!(1.25), Currency::USD);
        let b = Money::new(dec!(2.75), Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(4));
    }

    #[test]
    fn test_divide_for_unit_price() {
        let sum = Money::new(dec!(10), Currency::USD);
        assert_eq!(sum.divide(dec!(3)).unwrap().amount(), dec!(3.3333));
        assert_eq!(sum.divide(Decimal::ZERO), Err(MoneyError::DivisionByZero));
    }
}

mod quantity {
    use super::*;

    #[test]
    fn test_zero_quantity() {
        let q = Quantity::new(Decimal::ZERO, Unit::new("item").unwrap());
        assert!(q.is_zero());
    }

    #[test]
    fn test_invalid_quantity() {
        assert_eq!(
            Quantity::parse("1,5", "gb"),
            Err(QuantityError::InvalidQuantity("1,5".to_string()))
        );
    }
}
