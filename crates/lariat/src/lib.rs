mod config;
pub use config::{Config, ErrorPolicy, SqlFlavor};

mod hydrate;
pub use hydrate::{FieldValue, Record};

pub mod lookup;

mod manager;
pub use manager::Manager;

pub mod page;

mod query;
pub use query::Query;

mod relation;

mod translate;

pub use lariat_core::{schema, stmt, Driver, Error, Result, Schema};
