//! Shared fixture: a small library schema seeded into the memory driver.
//!
//! Entities: `author` (with a one-to-one `profile`), `book` (foreign key to
//! `author`, many-to-many `tags`), `tag` (many-to-many back to `book`
//! through the `book_tag` link entity). Both sides of the tag relation
//! traverse the same physical link table, one declared implicitly and one
//! through an explicit entity.

use lariat::schema::{EntityBuilder, FieldBuilder};
use lariat::stmt::Value;
use lariat::{Config, Manager, Result, Schema};
use lariat_driver_memory::MemoryDriver;

use chrono::NaiveDate;
use std::sync::Arc;

pub fn schema() -> Schema {
    Schema::builder()
        .entity(
            EntityBuilder::new("author")
                .id()
                .field(FieldBuilder::text("name"))
                .field(FieldBuilder::integer("age"))
                .field(FieldBuilder::one_to_one("profile", "profile").nullable()),
        )
        .entity(
            EntityBuilder::new("profile")
                .id()
                .field(FieldBuilder::text("bio")),
        )
        .entity(
            EntityBuilder::new("book")
                .id()
                .field(FieldBuilder::text("title"))
                .field(FieldBuilder::integer("pages"))
                .field(FieldBuilder::date("published"))
                .field(FieldBuilder::float("rating").nullable())
                .field(FieldBuilder::foreign_key("author", "author"))
                .field(FieldBuilder::many_to_many("tags", "tag")),
        )
        .entity(
            EntityBuilder::new("tag")
                .id()
                .field(FieldBuilder::text("label"))
                .field(FieldBuilder::many_to_many("books", "book").through("book_tag")),
        )
        .entity(
            EntityBuilder::new("book_tag")
                .id()
                .field(FieldBuilder::foreign_key("book", "book"))
                .field(FieldBuilder::foreign_key("tag", "tag")),
        )
        .build()
        .unwrap()
}

pub fn driver() -> Arc<MemoryDriver> {
    let driver = MemoryDriver::new();
    seed(&driver).unwrap();
    Arc::new(driver)
}

fn seed(driver: &MemoryDriver) -> Result<()> {
    driver.insert_table("author", &["id", "name", "age", "profile_id"]);
    for (id, name, age, profile) in [
        (1, "Ursula K. Le Guin", 88, Value::I64(1)),
        (2, "Frank Herbert", 65, Value::Null),
        (3, "Octavia Butler", 58, Value::I64(2)),
    ] {
        driver.insert_row(
            "author",
            vec![
                Value::I64(id),
                Value::String(name.into()),
                Value::I64(age),
                profile,
            ],
        )?;
    }

    driver.insert_table("profile", &["id", "bio"]);
    for (id, bio) in [(1, "essayist and novelist"), (2, "pioneer of the genre")] {
        driver.insert_row("profile", vec![Value::I64(id), Value::String(bio.into())])?;
    }

    driver.insert_table(
        "book",
        &["id", "title", "pages", "published", "rating", "author_id"],
    );
    for (id, title, pages, published, rating, author) in [
        (1, "Dune", 412, date(1965, 8, 1), Value::F64(4.5), 2),
        (
            2,
            "The Dispossessed",
            341,
            date(1974, 5, 1),
            Value::Null,
            1,
        ),
        (3, "Kindred", 264, date(1979, 6, 1), Value::F64(4.8), 3),
        (
            4,
            "The Left Hand of Darkness",
            304,
            date(1969, 3, 1),
            Value::F64(4.1),
            1,
        ),
        (
            5,
            "Children of Dune",
            444,
            date(1976, 4, 21),
            Value::Null,
            2,
        ),
    ] {
        driver.insert_row(
            "book",
            vec![
                Value::I64(id),
                Value::String(title.into()),
                Value::I64(pages),
                Value::Date(published),
                rating,
                Value::I64(author),
            ],
        )?;
    }

    driver.insert_table("tag", &["id", "label"]);
    for (id, label) in [(1, "scifi"), (2, "classic"), (3, "timetravel")] {
        driver.insert_row("tag", vec![Value::I64(id), Value::String(label.into())])?;
    }

    driver.insert_table("book_tag", &["id", "book_id", "tag_id"]);
    for (id, book, tag) in [(1, 1, 1), (2, 1, 2), (3, 2, 1), (4, 3, 3), (5, 4, 1), (6, 5, 1)] {
        driver.insert_row(
            "book_tag",
            vec![Value::I64(id), Value::I64(book), Value::I64(tag)],
        )?;
    }

    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn manager(entity: &str) -> Manager {
    manager_with(entity, Config::default())
}

pub fn manager_with(entity: &str, config: Config) -> Manager {
    Manager::new(driver(), Arc::new(schema()), entity, config).unwrap()
}

/// Primary keys of a result set, in result order.
pub fn ids(records: &[lariat::Record]) -> Vec<i64> {
    records
        .iter()
        .map(|record| match record.primary_key() {
            Value::I64(id) => *id,
            other => panic!("non-integer primary key: {other:?}"),
        })
        .collect()
}

/// A named text field of every record, in result order.
pub fn texts(records: &[lariat::Record], field: &str) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            record
                .value(field)
                .and_then(|value| value.as_str())
                .unwrap_or_else(|| panic!("record has no text field `{field}`"))
                .to_string()
        })
        .collect()
}
