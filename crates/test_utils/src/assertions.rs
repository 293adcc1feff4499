//! Custom Test Assertions
//!
//! Provides assertion helpers that print both descriptors when a matching
//! expectation fails.

use core_kernel::EntityRef;
use domain_billing::Identity;

/// Asserts `a.matches(b) == expected` in both directions
///
/// # Panics
///
/// Panics if either direction disagrees with `expected`.
pub fn assert_matches_symmetric<A, B>(a: &A, b: &B, expected: bool)
where
    A: Identity + ?Sized,
    B: Identity + ?Sized,
{
    let forward = domain_billing::matching::matches(a, b);
    let backward = domain_billing::matching::matches(b, a);
    assert_eq!(
        forward,
        expected,
        "{} matches {}: expected {}, got {}",
        a.uniq_id(),
        b.uniq_id(),
        expected,
        forward
    );
    assert_eq!(
        backward,
        expected,
        "{} matches {}: expected {}, got {}",
        b.uniq_id(),
        a.uniq_id(),
        expected,
        backward
    );
}

/// Asserts every pair in `group` matches (or not), and each member matches itself
pub fn assert_group_matches(group: &[&dyn Identity], expected: bool) {
    for (i, a) in group.iter().enumerate() {
        for (j, b) in group.iter().enumerate() {
            let want = if i == j { true } else { expected };
            assert_matches_symmetric(*a, *b, want);
        }
    }
}

/// Asserts two handles point at the same memoized instance
pub fn assert_same_entity(a: &EntityRef, b: &EntityRef) {
    assert!(
        a.ptr_eq(b),
        "expected the same {} instance, got two distinct ones: {:?} vs {:?}",
        a.kind(),
        a,
        b
    );
}

/// Asserts two handles point at distinct instances
pub fn assert_distinct_entities(a: &EntityRef, b: &EntityRef) {
    assert!(
        !a.ptr_eq(b),
        "expected distinct {} instances, got the same one: {:?}",
        a.kind(),
        a
    );
}
