//! Each lookup operator against the seeded library, checked by result set.

use lariat_tests::{ids, manager};
use pretty_assertions::assert_eq;

fn books(tokens: &[&str]) -> Vec<i64> {
    ids(&manager("book").filter(tokens).unwrap())
}

#[test]
fn exact_is_the_default_operator() {
    assert_eq!(books(&["title=Dune"]), vec![1]);
    assert_eq!(books(&["pages=412"]), vec![1]);
    assert_eq!(books(&["published=1965-08-01"]), vec![1]);
}

#[test]
fn contains_is_case_sensitive() {
    assert_eq!(books(&["title__contains=Dune"]), vec![1, 5]);
    assert_eq!(books(&["title__contains=dune"]), Vec::<i64>::new());
    assert_eq!(books(&["title__icontains=dune"]), vec![1, 5]);
}

#[test]
fn affix_operators() {
    assert_eq!(books(&["title__startswith=The"]), vec![2, 4]);
    assert_eq!(books(&["title__istartswith=the"]), vec![2, 4]);
    assert_eq!(books(&["title__endswith=ne"]), vec![1, 5]);
    assert_eq!(books(&["title__iendswith=NE"]), vec![1, 5]);
}

#[test]
fn membership_and_range() {
    assert_eq!(books(&["title__in=[Dune, Kindred]"]), vec![1, 3]);
    assert_eq!(books(&["id__in=[2, 4]"]), vec![2, 4]);
    // BETWEEN is inclusive at both ends
    assert_eq!(books(&["pages__range=[304, 412]"]), vec![1, 2, 4]);
}

#[test]
fn ordering_comparisons() {
    assert_eq!(books(&["pages__gt=341"]), vec![1, 5]);
    assert_eq!(books(&["pages__gte=341"]), vec![1, 2, 5]);
    assert_eq!(books(&["pages__lt=304"]), vec![3]);
    assert_eq!(books(&["pages__lte=304"]), vec![3, 4]);
}

#[test]
fn null_checks() {
    assert_eq!(books(&["rating__isnull=true"]), vec![2, 5]);
    assert_eq!(books(&["rating__isnull=false"]), vec![1, 3, 4]);
}

#[test]
fn regex_operators() {
    assert_eq!(books(&["title__regex=^The"]), vec![2, 4]);
    assert_eq!(books(&["title__regex=^the"]), Vec::<i64>::new());
    assert_eq!(books(&["title__iregex=^the"]), vec![2, 4]);
    assert_eq!(books(&["title__regex=Dune$"]), vec![1, 5]);
}

#[test]
fn date_part_lookups() {
    assert_eq!(books(&["published__year=1965"]), vec![1]);
    assert_eq!(books(&["published__year__gte=1974"]), vec![2, 3, 5]);
    assert_eq!(books(&["published__year__lt=1970"]), vec![1, 4]);
    assert_eq!(books(&["published__month=5"]), vec![2]);
    assert_eq!(books(&["published__day=1"]), vec![1, 2, 3, 4]);
    // 1965-08-01 was a Sunday, day 1 of the week
    assert_eq!(books(&["published__week_day=1"]), vec![1]);
}

#[test]
fn quoted_operands_keep_spaces() {
    assert_eq!(books(&["title='The Left Hand of Darkness'"]), vec![4]);
    assert_eq!(books(&["title=The Dispossessed"]), vec![2]);
}

#[test]
fn float_operands() {
    assert_eq!(books(&["rating__gte=4.5"]), vec![1, 3]);
}

#[test]
fn malformed_operands_are_parse_errors() {
    let err = manager("book").filter(&["pages=abc"]).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("invalid integer operand"));

    let err = manager("book").filter(&["title__wat=1"]).unwrap_err();
    assert!(err.is_parse());

    let err = manager("book").filter(&["missing=1"]).unwrap_err();
    assert!(err.is_parse());
}
