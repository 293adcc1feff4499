//! Property-Based Test Generators
//!
//! Provides proptest strategies for targets and target sets drawn from a
//! small domain, so that generated pairs overlap often enough to exercise
//! both outcomes of matching.

use proptest::prelude::*;

use domain_billing::{Target, TargetSet};

/// Strategy for an optional target type from a small pool
pub fn target_type_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("server".to_string())),
        Just(Some("domain".to_string())),
        Just(Some("ip".to_string())),
    ]
}

/// Strategy for an optional id in `1..=4`
pub fn target_id_strategy() -> impl Strategy<Value = Option<i64>> {
    proptest::option::of(1i64..=4)
}

/// Strategy for generating targets, wildcards included
pub fn target_strategy() -> impl Strategy<Value = Target> {
    (target_type_strategy(), target_id_strategy())
        .prop_map(|(target_type, id)| Target::new(target_type, id))
}

/// Strategy for generating non-empty target sets of up to four members
pub fn target_set_strategy() -> impl Strategy<Value = TargetSet> {
    prop::collection::vec(target_strategy(), 1..=4).prop_map(|targets| {
        TargetSet::new(targets).expect("strategy never yields an empty vec")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn target_sets_are_never_empty(set in target_set_strategy()) {
            prop_assert!(!set.targets().is_empty());
        }
    }
}
