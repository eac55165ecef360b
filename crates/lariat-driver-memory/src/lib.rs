//! In-process driver executing the statement tree against fixture tables.
//!
//! Exists for tests and demos; it interprets the statement AST directly and
//! never produces or parses SQL text.

mod eval;
mod like;

use lariat_core::driver::{Response, Row};
use lariat_core::stmt::{Expr, JoinKind, OrderBy, Select, Statement, Value};
use lariat_core::{Error, Result, Schema};

use indexmap::IndexMap;

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct MemoryDriver {
    tables: Mutex<IndexMap<String, Table>>,
}

#[derive(Debug)]
struct Table {
    columns: Arc<[String]>,
    rows: Vec<Vec<Value>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a fixture table with the given column labels.
    pub fn insert_table(&self, name: &str, columns: &[&str]) {
        let columns: Arc<[String]> = columns.iter().map(|c| c.to_string()).collect();
        self.tables
            .lock()
            .unwrap()
            .insert(name.to_string(), Table { columns, rows: vec![] });
    }

    /// Appends one fixture row. The table must exist and arity must match.
    pub fn insert_row(&self, name: &str, values: Vec<Value>) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .get_mut(name)
            .ok_or_else(|| Error::statement_execution_msg(format!("unknown table `{name}`")))?;
        if values.len() != table.columns.len() {
            return Err(Error::statement_execution_msg(format!(
                "table `{name}` has {} columns, row has {}",
                table.columns.len(),
                values.len()
            )));
        }
        table.rows.push(values);
        Ok(())
    }

    fn select(&self, select: &Select) -> Result<Response> {
        let tables = self.tables.lock().unwrap();

        // Joined statements qualify every label by source table so
        // duplicates stay unambiguous; single-table results keep bare
        // labels.
        let qualify = !select.joins.is_empty();
        let mut rows = materialize(&tables, select.from.qualifier(), &select.from.table, qualify)?;

        for join in &select.joins {
            let right = materialize(&tables, join.table.qualifier(), &join.table.table, true)?;
            rows = join_rows(rows, &right, &join.on, join.kind)?;
        }

        if let Some(filter) = &select.filter {
            let mut kept = Vec::with_capacity(rows.len());
            for row in rows {
                if eval::is_true(filter, &row)? {
                    kept.push(row);
                }
            }
            rows = kept;
        }

        if let Some(columns) = &select.distinct {
            rows = distinct_rows(rows, columns);
        }

        if let Some(order_by) = &select.order_by {
            sort_rows(&mut rows, order_by);
        }

        if let Some(limit) = &select.limit {
            let offset = limit.offset.unwrap_or(0) as usize;
            rows = rows
                .into_iter()
                .skip(offset)
                .take(limit.limit as usize)
                .collect();
        }

        if select.returning.is_count() {
            return Ok(Response::Count(rows.len() as u64));
        }
        Ok(Response::Rows(rows))
    }

    fn delete(&self, delete: &lariat_core::stmt::Delete) -> Result<Response> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.get_mut(&delete.from.table).ok_or_else(|| {
            Error::statement_execution_msg(format!("unknown table `{}`", delete.from.table))
        })?;

        let columns = table.columns.clone();
        let before = table.rows.len();

        match &delete.filter {
            None => table.rows.clear(),
            Some(filter) => {
                let mut kept = Vec::with_capacity(table.rows.len());
                for values in table.rows.drain(..) {
                    let row = Row::new(columns.clone(), values.clone());
                    if !eval::is_true(filter, &row)? {
                        kept.push(values);
                    }
                }
                table.rows = kept;
            }
        }

        Ok(Response::Count((before - table.rows.len()) as u64))
    }
}

impl lariat_core::Driver for MemoryDriver {
    fn exec(&self, _schema: &Schema, stmt: Statement) -> Result<Response> {
        match &stmt {
            Statement::Select(select) => self.select(select),
            Statement::Delete(delete) => self.delete(delete),
        }
    }

    fn exec_raw(&self, _sql: &str) -> Result<Response> {
        // Raw SQL belongs to drivers backed by a real database
        Err(Error::statement_execution_msg(
            "memory driver does not execute raw SQL",
        ))
    }
}

fn materialize(
    tables: &IndexMap<String, Table>,
    qualifier: &str,
    table: &str,
    qualify: bool,
) -> Result<Vec<Row>> {
    let table = tables
        .get(table)
        .ok_or_else(|| Error::statement_execution_msg(format!("unknown table `{table}`")))?;

    let columns: Arc<[String]> = if qualify {
        table
            .columns
            .iter()
            .map(|c| format!("{qualifier}.{c}"))
            .collect()
    } else {
        table.columns.clone()
    };

    Ok(table
        .rows
        .iter()
        .map(|values| Row::new(columns.clone(), values.clone()))
        .collect())
}

fn join_rows(left: Vec<Row>, right: &[Row], on: &Expr, kind: JoinKind) -> Result<Vec<Row>> {
    let mut joined = vec![];

    for row in left {
        let mut matched = false;
        for candidate in right {
            let merged = merge(&row, candidate);
            if eval::is_true(on, &merged)? {
                joined.push(merged);
                matched = true;
            }
        }
        if !matched && kind == JoinKind::Left {
            joined.push(merge_nulls(&row, right));
        }
    }

    Ok(joined)
}

fn merge(left: &Row, right: &Row) -> Row {
    let columns: Arc<[String]> = left
        .labels()
        .iter()
        .chain(right.labels())
        .cloned()
        .collect();
    let mut values = left.clone().into_values();
    values.extend(right.clone().into_values());
    Row::new(columns, values)
}

/// Left-join miss: the right side's columns come back null.
fn merge_nulls(left: &Row, right: &[Row]) -> Row {
    let right_labels: &[String] = right.first().map(|row| row.labels()).unwrap_or(&[]);
    let columns: Arc<[String]> = left
        .labels()
        .iter()
        .chain(right_labels)
        .cloned()
        .collect();
    let mut values = left.clone().into_values();
    values.extend(std::iter::repeat(Value::Null).take(right_labels.len()));
    Row::new(columns, values)
}

/// Projects to the distinct columns and keeps the first row per value
/// tuple. An empty column list deduplicates whole rows.
fn distinct_rows(rows: Vec<Row>, columns: &[lariat_core::stmt::ExprColumn]) -> Vec<Row> {
    let mut seen: Vec<Vec<Value>> = vec![];
    let mut kept = vec![];

    for row in rows {
        let key: Vec<Value> = if columns.is_empty() {
            row.clone().into_values()
        } else {
            columns
                .iter()
                .map(|column| eval::column_value(&row, column))
                .collect()
        };

        if seen.iter().any(|existing| existing == &key) {
            continue;
        }
        seen.push(key.clone());

        if columns.is_empty() {
            kept.push(row);
        } else {
            let labels: Arc<[String]> = columns.iter().map(|c| c.label()).collect();
            kept.push(Row::new(labels, key));
        }
    }

    kept
}

fn sort_rows(rows: &mut [Row], order_by: &OrderBy) {
    use lariat_core::stmt::Direction;

    rows.sort_by(|a, b| {
        for expr in &order_by.exprs {
            let left = eval::column_value(a, &expr.column);
            let right = eval::column_value(b, &expr.column);

            // Nulls sort first, matching no engine in particular but
            // staying deterministic.
            let ordering = match (left.is_null(), right.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => left.compare(&right).unwrap_or(Ordering::Equal),
            };

            let ordering = match expr.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}
