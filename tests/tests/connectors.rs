//! Connector tokens: left-to-right folding with equal precedence.

use lariat_tests::{ids, manager};
use pretty_assertions::assert_eq;

use std::collections::BTreeSet;

fn books(tokens: &[&str]) -> Vec<i64> {
    ids(&manager("book").filter(tokens).unwrap())
}

fn set(tokens: &[&str]) -> BTreeSet<i64> {
    books(tokens).into_iter().collect()
}

#[test]
fn adjacent_lookups_default_to_and() {
    assert_eq!(
        books(&["pages__gte=300", "title__startswith=The"]),
        vec![2, 4]
    );
}

#[test]
fn or_unions_result_sets() {
    assert_eq!(
        books(&["title__contains=Dune", "or", "pages__lt=300"]),
        vec![1, 3, 5]
    );
}

#[test]
fn folding_is_left_to_right_with_equal_precedence() {
    // (a AND b) OR c
    assert_eq!(
        books(&[
            "pages__gte=400",
            "and",
            "rating__isnull=false",
            "or",
            "title__startswith=The",
        ]),
        vec![1, 2, 4]
    );

    // (a OR b) AND c: swapping connector order changes the grouping
    assert_eq!(
        books(&[
            "title__startswith=The",
            "or",
            "pages__gte=400",
            "and",
            "rating__isnull=false",
        ]),
        vec![1, 4]
    );
}

#[test]
fn folded_chains_agree_with_set_algebra() {
    let a = "title__icontains=dune";
    let b = "pages__gte=400";
    let c = "author.age__lt=70";

    let a_set = set(&[a]);
    let b_set = set(&[b]);
    let c_set = set(&[c]);

    // a AND b OR c == (a ∩ b) ∪ c
    let and_or: BTreeSet<i64> = a_set.intersection(&b_set).copied().collect();
    let and_or: BTreeSet<i64> = and_or.union(&c_set).copied().collect();
    assert_eq!(set(&[a, "and", b, "or", c]), and_or);

    // a OR b AND c == (a ∪ b) ∩ c
    let or_and: BTreeSet<i64> = a_set.union(&b_set).copied().collect();
    let or_and: BTreeSet<i64> = or_and.intersection(&c_set).copied().collect();
    assert_eq!(set(&[a, "or", b, "and", c]), or_and);
}

#[test]
fn connectors_are_case_insensitive() {
    assert_eq!(
        books(&["title__contains=Dune", "OR", "pages__lt=300"]),
        books(&["title__contains=Dune", "or", "pages__lt=300"]),
    );
}

#[test]
fn dangling_connectors_are_rejected() {
    let books = manager("book");

    for tokens in [
        &["and", "title=Dune"][..],
        &["title=Dune", "or"][..],
        &["title=Dune", "and", "or", "pages=412"][..],
    ] {
        let err = books.filter(tokens).unwrap_err();
        assert!(err.is_parse(), "{tokens:?} should fail: {err}");
    }
}
