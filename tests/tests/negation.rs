//! Negated lookups and `exclude` produce complement sets.

use lariat_tests::{ids, manager};
use pretty_assertions::assert_eq;

use std::collections::BTreeSet;

fn all_books() -> BTreeSet<i64> {
    ids(&manager("book").all().unwrap()).into_iter().collect()
}

#[test]
fn negated_operator_complements_on_non_null_fields() {
    let books = manager("book");

    for token in [
        "title__contains=Dune",
        "pages__gte=341",
        "title__in=[Dune, Kindred]",
        "published__year__lt=1974",
    ] {
        let matched: BTreeSet<i64> = ids(&books.filter(&[token]).unwrap()).into_iter().collect();
        let negated_token = negate(token);
        let negated: BTreeSet<i64> = ids(&books.filter(&[negated_token.as_str()]).unwrap())
            .into_iter()
            .collect();

        assert!(matched.is_disjoint(&negated), "`{token}` overlaps");
        let union: BTreeSet<i64> = matched.union(&negated).copied().collect();
        assert_eq!(union, all_books(), "`{token}` union misses rows");
    }
}

/// `field__op=v` becomes `field__!op=v`; a bare `field=v` becomes `!field=v`.
fn negate(token: &str) -> String {
    match token.split_once("__") {
        Some((base, rest)) => format!("{base}__!{rest}"),
        None => format!("!{token}"),
    }
}

#[test]
fn nulls_escape_both_a_test_and_its_negation() {
    let books = manager("book");

    // Ratings 2 and 5 are null: neither side of the comparison sees them.
    assert_eq!(ids(&books.filter(&["rating__gte=4.0"]).unwrap()), vec![1, 3, 4]);
    assert_eq!(
        ids(&books.filter(&["rating__!gte=4.0"]).unwrap()),
        Vec::<i64>::new()
    );
}

#[test]
fn exclude_negates_a_whole_group() {
    let books = manager("book");

    assert_eq!(ids(&books.exclude(&["title__contains=Dune"]).unwrap()), vec![2, 3, 4]);

    // The group is negated as one predicate: NOT (a AND b)
    assert_eq!(
        ids(&books
            .exclude(&["pages__gte=400", "rating__isnull=false"])
            .unwrap()),
        vec![2, 3, 4, 5]
    );
}

#[test]
fn filter_and_exclude_combine() {
    let books = manager("book");

    let query = books
        .query()
        .filter(&["pages__gte=300"])
        .exclude(&["title__startswith=The"]);
    assert_eq!(ids(&books.select(query).unwrap()), vec![1, 5]);
}

#[test]
fn empty_in_list_matches_nothing_and_negated_matches_everything() {
    let books = manager("book");

    assert_eq!(ids(&books.filter(&["id__in=[]"]).unwrap()), Vec::<i64>::new());
    assert_eq!(ids(&books.filter(&["id__!in=[]"]).unwrap()), vec![1, 2, 3, 4, 5]);
}
