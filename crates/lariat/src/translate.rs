//! Lookup-to-predicate translation.
//!
//! Each parsed lookup becomes one expression leaf; tokens in a filter call
//! fold left to right at equal precedence into the boolean tree. Relation
//! paths register joins with the planner as a side effect.

mod joins;
pub(crate) use joins::JoinPlanner;

use crate::lookup::{self, Connector, DateCmp, LookupExpression, LookupOp, Operand, Token};

use lariat_core::schema::{EntityDescriptor, FieldTy, ScalarTy, Schema};
use lariat_core::stmt::{Expr, ExprColumn, Join, JoinKind, Value};
use lariat_core::{Error, Result};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub(crate) struct Translator<'a> {
    planner: JoinPlanner<'a>,
}

impl<'a> Translator<'a> {
    pub(crate) fn new(schema: &'a Schema, entity: &'a EntityDescriptor) -> Self {
        Self {
            planner: JoinPlanner::new(schema, entity),
        }
    }

    /// Folds one token group into a predicate tree.
    ///
    /// Returns `None` for an empty group, which callers treat as "match
    /// everything".
    pub(crate) fn predicate(&mut self, tokens: &[impl AsRef<str>]) -> Result<Option<Expr>> {
        let mut acc: Option<Expr> = None;
        let mut pending: Option<(Connector, &str)> = None;

        for raw in tokens {
            let raw = raw.as_ref();
            match lookup::parse(raw)? {
                Token::Connector(connector) => {
                    if acc.is_none() {
                        return Err(Error::parse(raw, "connector before any lookup"));
                    }
                    if pending.is_some() {
                        return Err(Error::parse(raw, "consecutive connectors"));
                    }
                    pending = Some((connector, raw));
                }
                Token::Lookup(lookup) => {
                    let leaf = self.lookup_to_expr(&lookup)?;
                    let connector = pending
                        .take()
                        .map(|(connector, _)| connector)
                        .unwrap_or(Connector::And);
                    acc = Some(match acc {
                        None => leaf,
                        Some(prev) => match connector {
                            Connector::And => Expr::and(prev, leaf),
                            Connector::Or => Expr::or(prev, leaf),
                        },
                    });
                }
            }
        }

        if let Some((_, raw)) = pending {
            return Err(Error::parse(raw, "dangling connector"));
        }
        Ok(acc)
    }

    pub(crate) fn join_entity(&mut self, target: &str, kind: JoinKind) -> Result<()> {
        self.planner.join_entity(target, kind)
    }

    pub(crate) fn into_joins(self) -> Vec<Join> {
        self.planner.into_joins()
    }

    fn lookup_to_expr(&mut self, lookup: &LookupExpression) -> Result<Expr> {
        let (entity, qualifier) = self.planner.resolve_path(&lookup.path, &lookup.token)?;

        let field = entity.field_by_name(&lookup.field).ok_or_else(|| {
            Error::parse(
                &lookup.token,
                format!("unknown field `{}` on entity `{}`", lookup.field, entity.name),
            )
        })?;

        // Foreign-key fields filter on the fk storage column, not the
        // related table's key; their operands coerce like the integer key.
        let ty = match &field.ty {
            FieldTy::Scalar(ty) => *ty,
            FieldTy::OneToOne(_) | FieldTy::ForeignKey(_) => ScalarTy::I64,
            FieldTy::ManyToMany(_) => {
                return Err(Error::parse(
                    &lookup.token,
                    format!("field `{}` has no storage column", field.name),
                ));
            }
        };

        let column = match qualifier {
            Some(table) => ExprColumn::qualified(table, &field.column_name),
            None => ExprColumn::new(&field.column_name),
        };

        let expr = self.op_to_expr(column, ty, lookup)?;
        Ok(if lookup.negated {
            Expr::not(expr)
        } else {
            expr
        })
    }

    fn op_to_expr(&self, column: ExprColumn, ty: ScalarTy, lookup: &LookupExpression) -> Result<Expr> {
        Ok(match lookup.op {
            LookupOp::Exact => Expr::eq(column, self.literal(lookup, ty)?),
            LookupOp::Lt => Expr::lt(column, self.literal(lookup, ty)?),
            LookupOp::Lte => Expr::le(column, self.literal(lookup, ty)?),
            LookupOp::Gt => Expr::gt(column, self.literal(lookup, ty)?),
            LookupOp::Gte => Expr::ge(column, self.literal(lookup, ty)?),

            LookupOp::Contains => like(column, self.text(lookup)?, Wildcard::Both, false),
            LookupOp::IContains => like(column, self.text(lookup)?, Wildcard::Both, true),
            LookupOp::StartsWith => like(column, self.text(lookup)?, Wildcard::Trailing, false),
            LookupOp::IStartsWith => like(column, self.text(lookup)?, Wildcard::Trailing, true),
            LookupOp::EndsWith => like(column, self.text(lookup)?, Wildcard::Leading, false),
            LookupOp::IEndsWith => like(column, self.text(lookup)?, Wildcard::Leading, true),

            LookupOp::In => {
                let values = self.list(lookup, ty)?;
                if values.is_empty() {
                    // An empty list matches nothing
                    Expr::value(false)
                } else {
                    Expr::in_list(column, values.into_iter().map(Expr::Value).collect())
                }
            }
            LookupOp::Range => {
                let values = self.list(lookup, ty)?;
                let [lo, hi] = &values[..] else {
                    return Err(Error::parse(
                        &lookup.token,
                        "range takes exactly two operands",
                    ));
                };
                Expr::between(column, lo.clone(), hi.clone())
            }

            LookupOp::IsNull => {
                if self.boolean(lookup)? {
                    Expr::is_null(column)
                } else {
                    Expr::is_not_null(column)
                }
            }

            LookupOp::Regex => Expr::regex(column, Expr::value(self.text(lookup)?), false),
            LookupOp::IRegex => Expr::regex(column, Expr::value(self.text(lookup)?), true),

            LookupOp::DatePart(part, cmp) => {
                use lariat_core::stmt::DatePart;

                if part == DatePart::Year {
                    year_rewrite(column, cmp, lookup)?
                } else {
                    let operand: i64 = self.text(lookup)?.parse().map_err(|_| {
                        Error::parse(&lookup.token, "date part operand must be an integer")
                    })?;
                    Expr::binary_op(
                        Expr::extract(part, column),
                        cmp.binary_op(),
                        Value::I64(operand),
                    )
                }
            }
        })
    }

    fn literal(&self, lookup: &LookupExpression, ty: ScalarTy) -> Result<Value> {
        coerce(&lookup.token, self.text(lookup)?, ty)
    }

    fn list(&self, lookup: &LookupExpression, ty: ScalarTy) -> Result<Vec<Value>> {
        let Operand::List(items) = &lookup.operand else {
            return Err(Error::parse(&lookup.token, "operator takes a list operand"));
        };
        items
            .iter()
            .map(|item| coerce(&lookup.token, item, ty))
            .collect()
    }

    fn text<'l>(&self, lookup: &'l LookupExpression) -> Result<&'l str> {
        match &lookup.operand {
            Operand::Literal(text) => Ok(text),
            Operand::List(_) => Err(Error::parse(
                &lookup.token,
                "operator takes a single operand",
            )),
        }
    }

    fn boolean(&self, lookup: &LookupExpression) -> Result<bool> {
        match coerce(&lookup.token, self.text(lookup)?, ScalarTy::Bool)? {
            Value::Bool(value) => Ok(value),
            _ => Err(Error::parse(&lookup.token, "operand must be a boolean")),
        }
    }
}

enum Wildcard {
    Leading,
    Trailing,
    Both,
}

fn like(column: ExprColumn, operand: &str, wildcard: Wildcard, insensitive: bool) -> Expr {
    let escaped = escape_like(operand);
    let pattern = match wildcard {
        Wildcard::Leading => format!("%{escaped}"),
        Wildcard::Trailing => format!("{escaped}%"),
        Wildcard::Both => format!("%{escaped}%"),
    };
    if insensitive {
        Expr::ilike(column, Expr::value(pattern))
    } else {
        Expr::like(column, Expr::value(pattern))
    }
}

/// Escapes LIKE wildcards in a literal operand so user input never widens
/// the match.
fn escape_like(operand: &str) -> String {
    let mut escaped = String::with_capacity(operand.len());
    for ch in operand.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Rewrites a `year` lookup to literal date comparisons instead of an
/// EXTRACT call.
fn year_rewrite(column: ExprColumn, cmp: DateCmp, lookup: &LookupExpression) -> Result<Expr> {
    let Operand::Literal(text) = &lookup.operand else {
        return Err(Error::parse(&lookup.token, "operator takes a single operand"));
    };
    let year: i32 = text
        .parse()
        .map_err(|_| Error::parse(&lookup.token, "year operand must be an integer"))?;

    let (first, last) = match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::parse(&lookup.token, "year out of range")),
    };

    Ok(match cmp {
        DateCmp::Eq => Expr::between(column, Value::Date(first), Value::Date(last)),
        DateCmp::Gt => Expr::gt(column, Value::Date(last)),
        DateCmp::Gte => Expr::ge(column, Value::Date(first)),
        DateCmp::Lt => Expr::lt(column, Value::Date(first)),
        DateCmp::Lte => Expr::le(column, Value::Date(last)),
    })
}

/// Coerces a textual operand against the target field's storage type.
fn coerce(token: &str, text: &str, ty: ScalarTy) -> Result<Value> {
    Ok(match ty {
        ScalarTy::Bool => match text.to_ascii_lowercase().as_str() {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => {
                return Err(Error::parse(token, format!("invalid boolean operand `{text}`")));
            }
        },
        ScalarTy::I64 => Value::I64(text.parse().map_err(|_| {
            Error::parse(token, format!("invalid integer operand `{text}`"))
        })?),
        ScalarTy::F64 => Value::F64(text.parse().map_err(|_| {
            Error::parse(token, format!("invalid numeric operand `{text}`"))
        })?),
        ScalarTy::Text => Value::String(text.to_string()),
        ScalarTy::Date => Value::Date(NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(
            |_| Error::parse(token, format!("invalid date operand `{text}`")),
        )?),
        ScalarTy::Time => Value::Time(NaiveTime::parse_from_str(text, "%H:%M:%S").map_err(
            |_| Error::parse(token, format!("invalid time operand `{text}`")),
        )?),
        ScalarTy::DateTime => Value::DateTime(parse_datetime(text).ok_or_else(|| {
            Error::parse(token, format!("invalid datetime operand `{text}`"))
        })?),
    })
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            // A bare date means midnight
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
        })
}
