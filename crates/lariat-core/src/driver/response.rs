use crate::stmt::Value;
use crate::{Error, Result};

use std::sync::Arc;

/// Result of executing one statement.
#[derive(Debug, Clone)]
pub enum Response {
    /// Rows from a read statement
    Rows(Vec<Row>),

    /// Affected-row or aggregate count
    Count(u64),
}

/// One result row: an ordered mapping from column label to value.
///
/// Labels of joined statements are qualified by source table name where
/// duplicates would otherwise collide.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Response {
    pub fn into_rows(self) -> Result<Vec<Row>> {
        match self {
            Self::Rows(rows) => Ok(rows),
            Self::Count(_) => Err(Error::msg("expected rows, driver returned a count")),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Self::Count(count) => Ok(count),
            Self::Rows(rows) => {
                // COUNT statements come back as one single-column row from
                // SQL drivers.
                match &rows[..] {
                    [row] if row.len() == 1 => row.value(0).to_i64().map(|n| n as u64),
                    _ => Err(Error::msg("expected a count, driver returned rows")),
                }
            }
        }
    }

    pub fn empty() -> Self {
        Self::Rows(vec![])
    }
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Builds a row from label/value pairs. Fixture helper.
    pub fn from_pairs(pairs: Vec<(String, Value)>) -> Self {
        let (columns, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self {
            columns: columns.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.columns
    }

    pub fn value(&self, index: usize) -> &Value {
        &self.values[index]
    }

    /// Looks a value up by column label.
    ///
    /// An unqualified label also matches its table-qualified form, so
    /// callers can read `id` from a joined row labeled `book.id`.
    pub fn get(&self, label: &str) -> Option<&Value> {
        if let Some(index) = self.columns.iter().position(|c| c == label) {
            return Some(&self.values[index]);
        }
        self.columns
            .iter()
            .position(|c| {
                c.rsplit_once('.')
                    .map(|(_, unqualified)| unqualified == label)
                    .unwrap_or(false)
            })
            .map(|index| &self.values[index])
    }

    /// Like [`get`](Self::get), failing when the label is absent.
    pub fn expect(&self, label: &str) -> Result<&Value> {
        self.get(label)
            .ok_or_else(|| Error::msg(format!("row has no column labeled `{label}`")))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
