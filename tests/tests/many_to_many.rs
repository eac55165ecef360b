//! Many-to-many traversal over implicit and through-entity declarations.
//!
//! `book.tags` names no link entity and resolves to the `book_tag` table by
//! convention; `tag.books` goes through the declared `book_tag` entity. Both
//! sides read the same physical rows, so traversal must agree.

use lariat::schema::FetchPolicy;
use lariat::stmt::Value;
use lariat::Config;
use lariat_tests::{ids, manager, manager_with, texts};
use pretty_assertions::assert_eq;

#[test]
fn implicit_side_filters_by_related_field() {
    let books = manager("book");
    assert_eq!(ids(&books.filter(&["tags.label=scifi"]).unwrap()), vec![1, 2, 4, 5]);
    assert_eq!(ids(&books.filter(&["tags.label=classic"]).unwrap()), vec![1]);
}

#[test]
fn through_side_filters_by_related_field() {
    let tags = manager("tag");
    assert_eq!(ids(&tags.filter(&["books.title=Dune"]).unwrap()), vec![1, 2]);
    assert_eq!(ids(&tags.filter(&["books.pages__lt=300"]).unwrap()), vec![3]);
}

#[test]
fn both_sides_agree_on_the_link_rows() {
    let tags = manager("tag");
    let eager_books = manager_with("book", Config::default().default_fetch(FetchPolicy::Eager));

    // Every (book, tag) pair visible from one side is visible from the other.
    for (book_id, title) in [(1, "Dune"), (3, "Kindred")] {
        let token = format!("books.title={title}");
        let tagged = ids(&tags.filter(&[token.as_str()]).unwrap());

        let book = eager_books.get_by_id(book_id).unwrap();
        let linked = ids(book.many("tags").unwrap());

        assert_eq!(linked, tagged);
    }
}

#[test]
fn eager_collections_resolve_from_both_sides() {
    let eager = Config::default().default_fetch(FetchPolicy::Eager);

    let book = manager_with("book", eager.clone()).get_by_id(1).unwrap();
    assert_eq!(texts(book.many("tags").unwrap(), "label"), vec!["scifi", "classic"]);

    let tag = manager_with("tag", eager).get_by_id(1).unwrap();
    assert_eq!(
        texts(tag.many("books").unwrap(), "title"),
        vec![
            "Dune",
            "The Dispossessed",
            "The Left Hand of Darkness",
            "Children of Dune"
        ]
    );
}

#[test]
fn mutually_eager_sides_terminate() {
    let eager = Config::default().default_fetch(FetchPolicy::Eager);
    let book = manager_with("book", eager).get_by_id(1).unwrap();

    // book 1 -> scifi -> books walks back over the link table.
    let tags = book.many("tags").unwrap();
    let back = tags[0].many("books").unwrap();
    assert_eq!(ids(back), vec![1, 2, 4, 5]);

    // The record that started the chain reappears with lazy relation slots
    // instead of recursing.
    let reentrant = back
        .iter()
        .find(|b| b.primary_key() == &Value::I64(1))
        .unwrap();
    assert!(reentrant.many("tags").unwrap().is_empty());

    // Records seen for the first time still resolve eagerly.
    let sibling = back
        .iter()
        .find(|b| b.primary_key() == &Value::I64(2))
        .unwrap();
    assert_eq!(texts(sibling.many("tags").unwrap(), "label"), vec!["scifi"]);
}

#[test]
fn shared_path_prefix_joins_once() {
    let books = manager("book");

    // Both lookups constrain the same joined tag row. A second join would
    // multiply matches pairwise; a single join yields one row per link.
    let rows = books
        .filter(&["tags.label__contains=c", "tags.label__contains=i"])
        .unwrap();
    assert_eq!(ids(&rows), vec![1, 1, 2, 4, 5]);
}

#[test]
fn fan_out_collapses_under_distinct() {
    let books = manager("book");

    let query = books
        .query()
        .filter(&["tags.label__contains=i"])
        .distinct(&["id"]);
    let rows = books.select(query).unwrap();
    assert_eq!(ids(&rows), vec![1, 2, 3, 4, 5]);
}

#[test]
fn terminal_many_to_many_field_has_no_column() {
    let err = manager("book").filter(&["tags=1"]).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("no storage column"));
}
