//! Overlap matching between identity descriptors
//!
//! Two descriptors match when they may denote a common resource. Each side
//! is reduced to its set of concrete ids and its set of concrete types, and
//! both dimensions have to agree. A dimension agrees when either side leaves
//! it open (an empty set is a wildcard) or when the two sets intersect.
//!
//! ```text
//! server:1   ~ [server:1, server:2]    ids {1} ∩ {1,2}, types agree
//! server:1   ≁ domain:1                types {server} ∩ {domain} = ∅
//! server:    ~ server:2                ids open on the left
//! :          ~ anything
//! ```
//!
//! The relation is symmetric and reflexive but not transitive.

use crate::target::Identity;

/// Symmetric overlap test
pub fn matches<A, B>(a: &A, b: &B) -> bool
where
    A: Identity + ?Sized,
    B: Identity + ?Sized,
{
    overlaps(&a.ids(), &b.ids()) && overlaps(&a.types(), &b.types())
}

/// Strict identity on the nominal `(type, id)` pair
pub fn equals<A, B>(a: &A, b: &B) -> bool
where
    A: Identity + ?Sized,
    B: Identity + ?Sized,
{
    a.target_type() == b.target_type() && a.id() == b.id()
}

fn overlaps<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.is_empty() || b.is_empty() || a.iter().any(|x| b.contains(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{Target, TargetSet};

    #[test]
    fn test_overlaps() {
        assert!(overlaps::<i64>(&[], &[1]));
        assert!(overlaps(&[1, 2], &[2, 3]));
        assert!(!overlaps(&[1], &[2]));
    }

    #[test]
    fn test_universal_wildcard_matches_everything() {
        let any = Target::any();
        assert!(matches(&any, &Target::of("domain", 7)));
        assert!(matches(&any, &Target::any_of("server")));
    }

    #[test]
    fn test_type_wildcards_compare_types() {
        assert!(matches(&Target::any_of("server"), &Target::of("server", 5)));
        assert!(!matches(&Target::any_of("server"), &Target::any_of("domain")));
    }

    #[test]
    fn test_equals_uses_nominal_pair() {
        let set = TargetSet::new(vec![Target::of("server", 1), Target::of("server", 2)]).unwrap();
        assert!(equals(&set, &Target::of("server", 1)));
        assert!(!equals(&set, &Target::of("server", 2)));
        assert!(matches(&set, &Target::of("server", 2)));
    }

    #[test]
    fn test_works_through_trait_objects() {
        let a: &dyn Identity = &Target::of("server", 1);
        let b: &dyn Identity = &Target::any_of("server");
        assert!(matches(a, b));
    }
}
