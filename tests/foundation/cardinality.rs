//! Integration tests for cardinalities
//!
//! Tests bounds, saturating sums, and cardinality ranges.

use ipsmodel_foundation::{Cardinality, CardinalityRange};
use proptest::prelude::*;

fn cardinality() -> impl Strategy<Value = Cardinality> {
    prop_oneof![
        any::<u32>().prop_map(Cardinality::Bounded),
        Just(Cardinality::Unbounded),
    ]
}

// =============================================================================
// Cardinality
// =============================================================================

#[test]
fn bounds() {
    assert_eq!(Cardinality::Bounded(3).bound(), Some(3));
    assert_eq!(Cardinality::Unbounded.bound(), None);
    assert!(Cardinality::Unbounded.is_unbounded());
    assert!(Cardinality::Bounded(3).admits(3));
    assert!(!Cardinality::Bounded(3).admits(4));
    assert!(Cardinality::Unbounded.admits(u32::MAX));
}

#[test]
fn saturating_add() {
    assert_eq!(
        Cardinality::Bounded(2).saturating_add(Cardinality::Bounded(3)),
        Cardinality::Bounded(5)
    );
    assert_eq!(
        Cardinality::Bounded(u32::MAX).saturating_add(Cardinality::Bounded(1)),
        Cardinality::Unbounded
    );
    assert_eq!(
        Cardinality::Bounded(1).saturating_add(Cardinality::Unbounded),
        Cardinality::Unbounded
    );
}

#[test]
fn display() {
    assert_eq!(Cardinality::Bounded(5).to_string(), "5");
    assert_eq!(Cardinality::Unbounded.to_string(), "*");
    assert_eq!(CardinalityRange::at_least(1).to_string(), "[1..*, 1]");
}

// =============================================================================
// Cardinality Ranges
// =============================================================================

#[test]
fn range_constants() {
    assert!(CardinalityRange::OPTIONAL.contains(0));
    assert!(CardinalityRange::OPTIONAL.contains(1));
    assert!(!CardinalityRange::MANDATORY.contains(0));
    assert!(CardinalityRange::FULL_RANGE.contains(1000));
    assert!(CardinalityRange::EXCLUDED.is_excluded());
    assert!(!CardinalityRange::OPTIONAL.is_excluded());
}

#[test]
fn bounded_range_defaults_to_min() {
    let range = CardinalityRange::bounded(1, 3);
    assert_eq!(range.default, 1);
    assert_eq!(range.max, Cardinality::Bounded(3));
    assert!(range.contains(2));
    assert!(!range.contains(4));
}

proptest! {
    #[test]
    fn unbounded_is_the_maximum(bound in any::<u32>()) {
        prop_assert!(Cardinality::Bounded(bound) < Cardinality::Unbounded);
    }

    #[test]
    fn addition_is_commutative(a in cardinality(), b in cardinality()) {
        prop_assert_eq!(a.saturating_add(b), b.saturating_add(a));
    }

    #[test]
    fn addition_never_shrinks(a in cardinality(), b in cardinality()) {
        let sum = a.saturating_add(b);
        prop_assert!(sum >= a);
        prop_assert!(sum >= b);
    }
}
