//! Relation traversal in filters, and eager versus lazy hydration.

use lariat::schema::FetchPolicy;
use lariat::stmt::Value;
use lariat::Config;
use lariat_tests::{ids, manager, manager_with, texts};
use pretty_assertions::assert_eq;

fn eager() -> Config {
    Config::default().default_fetch(FetchPolicy::Eager)
}

#[test]
fn filters_traverse_foreign_keys() {
    let books = manager("book");
    assert_eq!(
        ids(&books.filter(&["author.name=Ursula K. Le Guin"]).unwrap()),
        vec![2, 4]
    );
    assert_eq!(
        ids(&books.filter(&["author.age__gte=60"]).unwrap()),
        vec![1, 2, 4, 5]
    );
}

#[test]
fn terminal_foreign_key_fields_compare_by_id_column() {
    let books = manager("book");
    assert_eq!(ids(&books.filter(&["author=2"]).unwrap()), vec![1, 5]);
}

#[test]
fn lazy_hydration_leaves_placeholders() {
    let book = manager("book").get("title", "Dune").unwrap();

    assert_eq!(book.value("author"), Some(&Value::Null));
    assert_eq!(book.one("author"), None);
    assert_eq!(book.many("tags"), Some(&[][..]));
}

#[test]
fn eager_hydration_resolves_singular_relations() {
    let book = manager_with("book", eager()).get("title", "Dune").unwrap();

    let author = book.one("author").unwrap();
    assert_eq!(author.value("name"), Some(&Value::String("Frank Herbert".into())));
    assert!(author.persisted());

    // One level in, the author's own relations resolve too
    assert_eq!(author.value("profile"), Some(&Value::Null));
}

#[test]
fn eager_hydration_resolves_collections() {
    let book = manager_with("book", eager()).get("title", "Dune").unwrap();
    let tags = book.many("tags").unwrap();
    assert_eq!(texts(tags, "label"), vec!["scifi", "classic"]);
}

#[test]
fn eager_one_to_one_with_null_key_stays_null() {
    let authors = manager_with("author", eager());

    let le_guin = authors.get("name", "Ursula K. Le Guin").unwrap();
    let profile = le_guin.one("profile").unwrap();
    assert_eq!(
        profile.value("bio"),
        Some(&Value::String("essayist and novelist".into()))
    );

    let herbert = authors.get("name", "Frank Herbert").unwrap();
    assert_eq!(herbert.one("profile"), None);
    assert_eq!(herbert.value("profile"), Some(&Value::Null));
}

#[test]
fn scalar_fields_agree_between_fetch_policies() {
    let lazy = manager("book").all().unwrap();
    let eager = manager_with("book", eager()).all().unwrap();

    assert_eq!(lazy.len(), eager.len());
    for (a, b) in lazy.iter().zip(&eager) {
        assert_eq!(a.primary_key(), b.primary_key());
        assert_eq!(a.persisted(), b.persisted());
        for field in ["title", "pages", "published", "rating"] {
            assert_eq!(a.value(field), b.value(field), "field `{field}`");
        }
    }
}

#[test]
fn field_level_policy_wins_over_config() {
    use lariat::schema::{EntityBuilder, FieldBuilder};
    use lariat::{Manager, Schema};
    use std::sync::Arc;

    let schema = Schema::builder()
        .entity(
            EntityBuilder::new("author")
                .id()
                .field(FieldBuilder::text("name")),
        )
        .entity(
            EntityBuilder::new("book")
                .id()
                .field(FieldBuilder::text("title"))
                .field(FieldBuilder::foreign_key("author", "author").eager()),
        )
        .build()
        .unwrap();

    let driver = lariat_driver_memory::MemoryDriver::new();
    driver.insert_table("author", &["id", "name"]);
    driver
        .insert_row("author", vec![Value::I64(1), Value::String("Ann".into())])
        .unwrap();
    driver.insert_table("book", &["id", "title", "author_id"]);
    driver
        .insert_row(
            "book",
            vec![Value::I64(1), Value::String("Hills".into()), Value::I64(1)],
        )
        .unwrap();

    // Config says lazy, the field says eager
    let books = Manager::new(Arc::new(driver), Arc::new(schema), "book", Config::default()).unwrap();
    let book = books.get_by_id(1).unwrap();
    assert_eq!(
        book.one("author").unwrap().value("name"),
        Some(&Value::String("Ann".into()))
    );
}

#[test]
fn records_report_persistence_from_the_primary_key() {
    let books = manager("book");
    for record in books.all().unwrap() {
        assert!(record.persisted());
    }
}
