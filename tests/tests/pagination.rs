//! Page arithmetic and ordering guarantees.

use lariat_tests::{ids, manager};
use pretty_assertions::assert_eq;

#[test]
fn pages_concatenate_to_the_full_ordered_set() {
    let books = manager("book");
    let mut collected = vec![];

    for number in 1.. {
        let page = books.page(number, 2, "", &[]).unwrap();
        if page.is_empty() {
            break;
        }
        collected.extend(ids(&page));
    }

    assert_eq!(collected, vec![1, 2, 3, 4, 5]);
}

#[test]
fn default_order_is_primary_key_ascending() {
    let books = manager("book");
    assert_eq!(ids(&books.page(1, 2, "", &[]).unwrap()), vec![1, 2]);
    assert_eq!(ids(&books.page(3, 2, "", &[]).unwrap()), vec![5]);
    assert_eq!(ids(&books.page(4, 2, "", &[]).unwrap()), Vec::<i64>::new());
}

#[test]
fn explicit_order_field() {
    let books = manager("book");
    // pages descending: 444, 412, 341, 304, 264
    assert_eq!(ids(&books.page(1, 2, "-pages", &[]).unwrap()), vec![5, 1]);
    assert_eq!(ids(&books.page(1, 2, "pages", &[]).unwrap()), vec![3, 4]);
}

#[test]
fn non_positive_page_numbers_are_empty() {
    let books = manager("book");
    assert!(books.page(0, 2, "", &[]).unwrap().is_empty());
    assert!(books.page(-3, 2, "", &[]).unwrap().is_empty());
}

#[test]
fn pages_respect_filters() {
    let books = manager("book");
    let page = books.page(1, 2, "", &["pages__gte=341"]).unwrap();
    assert_eq!(ids(&page), vec![1, 2]);
    let page = books.page(2, 2, "", &["pages__gte=341"]).unwrap();
    assert_eq!(ids(&page), vec![5]);
}

#[test]
fn reverse_page_flips_the_order_field() {
    let books = manager("book");
    assert_eq!(
        ids(&books.reverse_page(1, 2, "pages", &[]).unwrap()),
        vec![5, 1]
    );
    assert_eq!(
        ids(&books.reverse_page(1, 2, "-pages", &[]).unwrap()),
        vec![3, 4]
    );
    // No order field reverses the primary key default
    assert_eq!(ids(&books.reverse_page(1, 2, "", &[]).unwrap()), vec![5, 4]);
}

#[test]
fn order_reversal_is_an_involution() {
    use lariat::page::reverse;

    assert_eq!(reverse("pages"), "-pages");
    assert_eq!(reverse("-pages"), "pages");
    assert_eq!(reverse(&reverse("pages")), "pages");
    assert_eq!(reverse(&reverse("-pages")), "-pages");
}

#[test]
fn forward_and_reverse_pages_cover_the_same_set() {
    let books = manager("book");

    let mut forward = vec![];
    let mut backward = vec![];
    for number in 1..=3 {
        forward.extend(ids(&books.page(number, 2, "pages", &[]).unwrap()));
        backward.extend(ids(&books.reverse_page(number, 2, "pages", &[]).unwrap()));
    }

    backward.reverse();
    assert_eq!(forward, backward);
}
