//! Compatibility fixture for the legacy connector-collapse rule.
//!
//! Older releases joined every lookup in a chain with a single connector,
//! rewriting a mixed run such as `AND OR AND` to `OR`. The engine now folds
//! an explicit expression tree left to right. This fixture pins down where
//! the two semantics agree and where they deliberately part ways.

use lariat_tests::{ids, manager};
use pretty_assertions::assert_eq;

use std::collections::BTreeSet;

fn set(tokens: &[&str]) -> BTreeSet<i64> {
    ids(&manager("book").filter(tokens).unwrap())
        .into_iter()
        .collect()
}

/// The legacy rule: one connector for the whole chain, `Or` winning over
/// `And` whenever the run is mixed.
fn collapsed(leaves: &[&str], connectors: &[&str]) -> BTreeSet<i64> {
    let any_or = connectors.iter().any(|c| c.eq_ignore_ascii_case("or"));

    let mut leaf_sets = leaves.iter().map(|leaf| set(&[leaf]));
    let first = leaf_sets.next().unwrap_or_default();
    leaf_sets.fold(first, |acc, leaf| {
        if any_or {
            acc.union(&leaf).copied().collect()
        } else {
            acc.intersection(&leaf).copied().collect()
        }
    })
}

#[test]
fn uniform_chains_agree_with_the_collapse_rule() {
    let a = "title__icontains=dune";
    let b = "pages__gte=300";
    let c = "rating__isnull=false";

    assert_eq!(
        set(&[a, "and", b, "and", c]),
        collapsed(&[a, b, c], &["and", "and"])
    );
    assert_eq!(
        set(&[a, "or", b, "or", c]),
        collapsed(&[a, b, c], &["or", "or"])
    );
}

#[test]
fn two_term_chains_agree_with_the_collapse_rule() {
    let a = "title__startswith=The";
    let b = "pages__lt=300";

    assert_eq!(set(&[a, "and", b]), collapsed(&[a, b], &["and"]));
    assert_eq!(set(&[a, "or", b]), collapsed(&[a, b], &["or"]));
}

#[test]
fn mixed_chains_diverge_by_design() {
    // Chosen so (a AND b) OR c differs from a OR b OR c.
    let a = "pages__gte=400";
    let b = "rating__isnull=false";
    let c = "title__startswith=The";

    let folded = set(&[a, "and", b, "or", c]);
    let legacy = collapsed(&[a, b, c], &["and", "or"]);

    assert_eq!(folded, BTreeSet::from([1, 2, 4]));
    assert_eq!(legacy, BTreeSet::from([1, 2, 3, 4, 5]));
    assert_ne!(folded, legacy);
}
