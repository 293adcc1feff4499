//! Billing factory integration tests
//!
//! Exercises the per-kind factories through the generic resolver: aliasing
//! by id and login, nested seller and type resolution, and failure paths.

use std::sync::Arc;

use serde_json::json;

use core_kernel::factory::FactoryError;
use domain_billing::{billing_factory, BillingFactoryExt, Identity, Target};
use test_utils::{assert_distinct_entities, assert_same_entity, init_tracing, RawDataFixtures};

mod customers {
    use super::*;

    #[test]
    fn test_customer_aliases_by_id_and_login() {
        init_tracing();
        let mut factory = billing_factory();

        let full = factory.resolve("customer", &json!({"id": 7, "login": "alice"})).unwrap();
        let by_login = factory.resolve("customer", &json!("alice")).unwrap();
        let by_id = factory.resolve("customer", &json!({"id": 7})).unwrap();

        assert_same_entity(&full, &by_login);
        assert_same_entity(&full, &by_id);
    }

    #[test]
    fn test_generated_customers_are_distinct() {
        let mut factory = billing_factory();
        let a = factory.resolve("customer", &RawDataFixtures::customer(1)).unwrap();
        let b = factory.resolve("customer", &RawDataFixtures::customer(2)).unwrap();
        assert_distinct_entities(&a, &b);
    }

    #[test]
    fn test_seller_resolves_to_shared_customer() {
        let mut factory = billing_factory();
        let bob = factory
            .customer(&RawDataFixtures::customer_with_seller(8, "bob", "reseller"))
            .unwrap();
        let reseller = factory.customer(&json!("reseller")).unwrap();

        assert!(Arc::ptr_eq(bob.seller().unwrap(), &reseller));
        assert_eq!(reseller.login(), Some("reseller"));
        assert_eq!(reseller.id(), None);
    }

    #[test]
    fn test_customer_without_id_or_login_is_rejected() {
        let mut factory = billing_factory();
        let err = factory.resolve("customer", &json!({"seller": "reseller"})).unwrap_err();
        assert!(matches!(err, FactoryError::InvalidData { .. }));
    }
}

mod plans {
    use super::*;

    #[test]
    fn test_plan_shares_seller_with_customers() {
        let mut factory = billing_factory();
        let reseller = factory.customer(&json!({"id": 1, "login": "reseller"})).unwrap();
        let plan = factory.plan(&RawDataFixtures::plan(5, "basic", "reseller")).unwrap();

        assert_eq!(plan.name(), "basic");
        assert!(Arc::ptr_eq(plan.seller().unwrap(), &reseller));
    }

    #[test]
    fn test_plan_natural_key_includes_seller() {
        let mut factory = billing_factory();
        let a = factory.resolve("plan", &json!({"name": "basic", "seller": "r1"})).unwrap();
        let b = factory.resolve("plan", &json!({"name": "basic", "seller": "r2"})).unwrap();
        let c = factory.resolve("plan", &json!({"name": "basic", "seller": "r1"})).unwrap();

        assert_distinct_entities(&a, &b);
        assert_same_entity(&a, &c);
    }

    #[test]
    fn test_nested_failure_aborts_plan() {
        let mut factory = billing_factory();
        let err = factory
            .resolve("plan", &json!({"id": 3, "name": "basic", "seller": {}}))
            .unwrap_err();
        assert_eq!(err.kind(), Some("customer"));
        assert!(factory.registry().find("plan", &[core_kernel::factory::CacheKey::Id("3".into())]).is_none());
    }
}

mod targets {
    use super::*;

    #[test]
    fn test_target_type_is_resolved_through_type_factory() {
        let mut factory = billing_factory();
        let target = factory.target(&RawDataFixtures::target(1, "server")).unwrap();

        assert_eq!(target.target_type(), Some("server"));
        assert_eq!(target.id(), Some(1));
        assert!(target.matches(&Target::any_of("server")));

        let server_type = factory.resource_type(&json!("server")).unwrap();
        assert_eq!(server_type.name(), "server");
        assert_eq!(factory.registry().key_count("type"), 1);
    }

    #[test]
    fn test_named_target_aliases_by_type_and_name() {
        let mut factory = billing_factory();
        let first = factory
            .resolve("target", &json!({"id": 11, "type": "server", "name": "web01"}))
            .unwrap();
        let by_name = factory
            .resolve("target", &json!({"type": "server", "name": "web01"}))
            .unwrap();
        assert_same_entity(&first, &by_name);
    }

    #[test]
    fn test_target_identifiers_are_global_across_types() {
        let mut factory = billing_factory();
        let server = factory.target(&RawDataFixtures::target(1, "server")).unwrap();
        let again = factory.target(&RawDataFixtures::target(1, "domain")).unwrap();
        assert!(Arc::ptr_eq(&server, &again));
        assert_eq!(again.target_type(), Some("server"));
    }
}

mod configuration {
    use super::*;

    #[test]
    fn test_unknown_kind() {
        let mut factory = billing_factory();
        let err = factory.resolve("invoice", &json!({"id": 1})).unwrap_err();
        assert!(matches!(err, FactoryError::UnknownEntity(ref kind) if kind == "invoice"));
    }

    #[test]
    fn test_known_kind_without_factory() {
        let mut factory = billing_factory();
        let err = factory.resolve("sale", &json!({"id": 1})).unwrap_err();
        assert!(matches!(err, FactoryError::FactoryNotFound(ref kind) if kind == "sale"));
    }

    #[test]
    fn test_money_resolves_without_billing_factories() {
        let mut factory = billing_factory();
        let a = factory.money(&json!("10.00 USD")).unwrap();
        let b = factory.money(&RawDataFixtures::money("10.00", "USD")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
