#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

// Fragment serializers
mod expr;
mod statement;
mod value;

use lariat_core::stmt::Statement;

/// Serialize a statement to a SQL string.
///
/// Values are emitted inline as SQL literals; the generated text is the only
/// persisted format this engine owns.
#[derive(Debug)]
pub struct Serializer {
    /// The flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    fn is_mysql(&self) -> bool {
        matches!(self.flavor, Flavor::Mysql)
    }

    fn is_postgresql(&self) -> bool {
        matches!(self.flavor, Flavor::Postgresql)
    }
}
