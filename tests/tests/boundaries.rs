//! Degenerate inputs and the single-record accessors.

use lariat::stmt::Value;
use lariat_tests::{ids, manager, texts};
use pretty_assertions::assert_eq;

#[test]
fn empty_filter_is_all() {
    let books = manager("book");
    assert_eq!(ids(&books.filter(&[]).unwrap()), ids(&books.all().unwrap()));
    assert_eq!(books.all().unwrap().len(), 5);
}

#[test]
fn get_returns_exactly_one() {
    let books = manager("book");

    let book = books.get("title", "Kindred").unwrap();
    assert_eq!(book.primary_key(), &Value::I64(3));
    assert_eq!(book.value("pages"), Some(&Value::I64(264)));
}

#[test]
fn get_misses_are_typed() {
    let books = manager("book");

    let err = books.get("title", "Solaris").unwrap_err();
    assert!(err.is_does_not_exist());
    assert!(err.to_string().contains("title=Solaris"));

    let err = books.get("author.name", "Frank Herbert").unwrap_err();
    assert!(err.is_multiple_objects_returned());
}

#[test]
fn get_by_id_round_trips() {
    let books = manager("book");

    let book = books.get_by_id(4).unwrap();
    assert_eq!(
        book.value("title"),
        Some(&Value::String("The Left Hand of Darkness".into()))
    );

    let err = books.get_by_id(99).unwrap_err();
    assert!(err.is_does_not_exist());
}

#[test]
fn count_matches_result_length() {
    let books = manager("book");

    assert_eq!(books.count(&[]).unwrap(), 5);
    assert_eq!(books.count(&["pages__gte=341"]).unwrap(), 3);
    assert_eq!(books.count(&["id__in=[]"]).unwrap(), 0);
    // Counting across a fan-out join counts joined rows, not entities
    assert_eq!(books.count(&["tags.label=scifi"]).unwrap(), 4);
}

#[test]
fn delete_returns_the_affected_count() {
    let books = manager("book");

    assert_eq!(books.delete(&["pages__lt=300"]).unwrap(), 1);
    assert_eq!(books.count(&[]).unwrap(), 4);
    assert_eq!(books.delete(&["pages__lt=300"]).unwrap(), 0);
}

#[test]
fn delete_refuses_relation_paths() {
    let books = manager("book");

    let err = books.delete(&["author.name=Frank Herbert"]).unwrap_err();
    assert!(err.to_string().contains("cannot traverse relations"));
    // Nothing was deleted
    assert_eq!(books.count(&[]).unwrap(), 5);
}

#[test]
fn order_distinct_and_limit_compose() {
    let books = manager("book");

    let query = books
        .query()
        .filter(&["pages__gte=300"])
        .order_by(&["-pages"])
        .limit(2)
        .offset(1);
    let page = books.select(query).unwrap();
    assert_eq!(texts(&page, "title"), vec!["Dune", "The Dispossessed"]);
}

#[test]
fn query_values_fork_without_aliasing() {
    let books = manager("book");

    let base = books.query().filter(&["pages__gte=300"]);
    let narrowed = base.clone().filter(&["title__contains=Dune"]);

    assert_eq!(ids(&books.select(base).unwrap()), vec![1, 2, 4, 5]);
    assert_eq!(ids(&books.select(narrowed).unwrap()), vec![1, 5]);
}

#[test]
fn manager_clones_share_the_driver() {
    let books = manager("book");
    let forked = books.clone();

    assert_eq!(books.delete(&["id=1"]).unwrap(), 1);
    // The clone shares the driver, so it observes the delete
    assert_eq!(forked.count(&[]).unwrap(), 4);
}
