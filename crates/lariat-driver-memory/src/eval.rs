//! Predicate evaluation over result rows.
//!
//! Follows SQL three-valued logic: comparisons against null are unknown,
//! and a filter keeps a row only when the predicate is definitely true.

use crate::like;

use lariat_core::driver::Row;
use lariat_core::stmt::{DatePart, Expr, ExprColumn, Value};
use lariat_core::{Error, Result};

use chrono::{Datelike, Timelike};
use std::cmp::Ordering;

/// Truth value of a predicate: true, false, or unknown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Truth {
    True,
    False,
    Unknown,
}

pub(crate) fn is_true(expr: &Expr, row: &Row) -> Result<bool> {
    Ok(truth(expr, row)? == Truth::True)
}

pub(crate) fn column_value(row: &Row, column: &ExprColumn) -> Value {
    row.get(&column.label())
        .or_else(|| row.get(&column.name))
        .cloned()
        .unwrap_or(Value::Null)
}

fn truth(expr: &Expr, row: &Row) -> Result<Truth> {
    Ok(match expr {
        Expr::And(and) => {
            let mut result = Truth::True;
            for operand in &and.operands {
                match truth(operand, row)? {
                    Truth::False => return Ok(Truth::False),
                    Truth::Unknown => result = Truth::Unknown,
                    Truth::True => {}
                }
            }
            result
        }
        Expr::Or(or) => {
            let mut result = Truth::False;
            for operand in &or.operands {
                match truth(operand, row)? {
                    Truth::True => return Ok(Truth::True),
                    Truth::Unknown => result = Truth::Unknown,
                    Truth::False => {}
                }
            }
            result
        }
        Expr::Not(not) => match truth(&not.operand, row)? {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Unknown => Truth::Unknown,
        },

        Expr::BinaryOp(op) => {
            let lhs = scalar(&op.lhs, row)?;
            let rhs = scalar(&op.rhs, row)?;
            match lhs.compare(&rhs) {
                None => Truth::Unknown,
                Some(ordering) => from_bool(matches_op(op.op, ordering)),
            }
        }

        Expr::InList(in_list) => {
            let value = scalar(&in_list.expr, row)?;
            if value.is_null() {
                return Ok(Truth::Unknown);
            }
            let mut found = false;
            for item in &in_list.list {
                if value.sql_eq(&scalar(item, row)?) {
                    found = true;
                    break;
                }
            }
            from_bool(found)
        }

        Expr::Between(between) => {
            let value = scalar(&between.expr, row)?;
            let lo = scalar(&between.lo, row)?;
            let hi = scalar(&between.hi, row)?;
            match (value.compare(&lo), value.compare(&hi)) {
                (Some(l), Some(h)) => from_bool(l != Ordering::Less && h != Ordering::Greater),
                _ => Truth::Unknown,
            }
        }

        Expr::IsNull(is_null) => {
            let value = scalar(&is_null.expr, row)?;
            from_bool(value.is_null() != is_null.negate)
        }

        Expr::Like(like_expr) => {
            let value = scalar(&like_expr.expr, row)?;
            let pattern = scalar(&like_expr.pattern, row)?;
            match (value, pattern) {
                (Value::Null, _) | (_, Value::Null) => Truth::Unknown,
                (Value::String(text), Value::String(pattern)) => {
                    let matched = if like_expr.insensitive {
                        like::matches(&pattern.to_uppercase(), &text.to_uppercase())
                    } else {
                        like::matches(&pattern, &text)
                    };
                    from_bool(matched)
                }
                _ => Truth::False,
            }
        }

        Expr::Regex(regex_expr) => {
            let value = scalar(&regex_expr.expr, row)?;
            let pattern = scalar(&regex_expr.pattern, row)?;
            match (value, pattern) {
                (Value::Null, _) | (_, Value::Null) => Truth::Unknown,
                (Value::String(text), Value::String(pattern)) => {
                    let regex = regex::RegexBuilder::new(&pattern)
                        .case_insensitive(regex_expr.insensitive)
                        .build()
                        .map_err(Error::statement_execution)?;
                    from_bool(regex.is_match(&text))
                }
                _ => Truth::False,
            }
        }

        // Scalar expressions used in boolean position
        other => match scalar(other, row)? {
            Value::Bool(true) => Truth::True,
            Value::Bool(false) => Truth::False,
            Value::Null => Truth::Unknown,
            other => {
                return Err(Error::statement_execution_msg(format!(
                    "expected a boolean predicate, found {other:?}"
                )));
            }
        },
    })
}

fn scalar(expr: &Expr, row: &Row) -> Result<Value> {
    Ok(match expr {
        Expr::Value(value) => value.clone(),
        Expr::Column(column) => column_value(row, column),
        Expr::Extract(extract) => {
            let value = scalar(&extract.expr, row)?;
            extract_part(extract.part, &value)?
        }
        other => {
            return Err(Error::statement_execution_msg(format!(
                "expected a scalar expression, found {other:?}"
            )));
        }
    })
}

/// Extracts one date part as an integer.
///
/// `WeekDay` counts Sunday as 1 through Saturday as 7, matching the
/// lookup DSL's `week_day` numbering.
fn extract_part(part: DatePart, value: &Value) -> Result<Value> {
    let (date, time) = match value {
        Value::Null => return Ok(Value::Null),
        Value::Date(d) => (Some(*d), None),
        Value::Time(t) => (None, Some(*t)),
        Value::DateTime(dt) => (Some(dt.date()), Some(dt.time())),
        other => {
            return Err(Error::statement_execution_msg(format!(
                "cannot extract {part} from {other:?}"
            )));
        }
    };

    let missing = || {
        Error::statement_execution_msg(format!("cannot extract {part} from {value:?}"))
    };

    let n: i64 = match part {
        DatePart::Year => date.ok_or_else(missing)?.year() as i64,
        DatePart::Month => date.ok_or_else(missing)?.month() as i64,
        DatePart::Day => date.ok_or_else(missing)?.day() as i64,
        DatePart::WeekDay => {
            date.ok_or_else(missing)?.weekday().num_days_from_sunday() as i64 + 1
        }
        DatePart::Hour => time.ok_or_else(missing)?.hour() as i64,
        DatePart::Minute => time.ok_or_else(missing)?.minute() as i64,
        DatePart::Second => time.ok_or_else(missing)?.second() as i64,
    };
    Ok(Value::I64(n))
}

fn matches_op(op: lariat_core::stmt::BinaryOp, ordering: Ordering) -> bool {
    use lariat_core::stmt::BinaryOp::*;

    match op {
        Eq => ordering == Ordering::Equal,
        Ne => ordering != Ordering::Equal,
        Lt => ordering == Ordering::Less,
        Le => ordering != Ordering::Greater,
        Gt => ordering == Ordering::Greater,
        Ge => ordering != Ordering::Less,
    }
}

fn from_bool(value: bool) -> Truth {
    if value {
        Truth::True
    } else {
        Truth::False
    }
}
