use super::{Delimited, Formatter, Ident, ToSql};

use lariat_core::stmt::{self, DatePart};

/// Parenthesizes boolean connectives so nested And/Or trees keep their
/// shape in the flat text.
struct Grouped<'a>(&'a stmt::Expr);

impl ToSql for Grouped<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self.0 {
            stmt::Expr::And(_) | stmt::Expr::Or(_) => fmt!(f, "(" self.0 ")"),
            expr => expr.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Expr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use stmt::Expr::*;

        match self {
            And(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " AND "));
            }
            Or(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " OR "));
            }
            Not(expr) => {
                fmt!(f, "NOT (" expr.operand ")");
            }
            BinaryOp(expr) => {
                let op = expr.op.to_string();
                fmt!(f, expr.lhs " " op.as_str() " " expr.rhs);
            }
            Column(expr) => expr.to_sql(f),
            InList(expr) => {
                let list = Delimited(&expr.list, ", ");
                fmt!(f, expr.expr " IN (" list ")");
            }
            Between(expr) => {
                fmt!(f, expr.expr " BETWEEN " expr.lo " AND " expr.hi);
            }
            IsNull(expr) => {
                if expr.negate {
                    fmt!(f, expr.expr " IS NOT NULL");
                } else {
                    fmt!(f, expr.expr " IS NULL");
                }
            }
            Like(expr) => {
                if expr.insensitive {
                    fmt!(f, "UPPER(" expr.expr ") LIKE UPPER(" expr.pattern ")");
                } else {
                    fmt!(f, expr.expr " LIKE " expr.pattern);
                }
            }
            Regex(expr) => {
                if f.serializer.is_postgresql() {
                    let op = if expr.insensitive { " ~* " } else { " ~ " };
                    fmt!(f, expr.expr op expr.pattern);
                } else if expr.insensitive {
                    // MySQL REGEXP matching is case sensitive on binary
                    // collations; fold both sides explicitly.
                    fmt!(f, "LOWER(" expr.expr ") REGEXP LOWER(" expr.pattern ")");
                } else {
                    fmt!(f, expr.expr " REGEXP " expr.pattern);
                }
            }
            Extract(expr) => expr.to_sql(f),
            Value(value) => value.to_sql(f),
        }
    }
}

impl ToSql for &stmt::ExprColumn {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if let Some(table) = &self.table {
            fmt!(f, Ident(table) "." Ident(&self.name));
        } else {
            fmt!(f, Ident(&self.name));
        }
    }
}

impl ToSql for &stmt::ExprExtract {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if self.part == DatePart::WeekDay {
            // Week days number Sunday as 1 through Saturday as 7. MySQL's
            // DAYOFWEEK already counts that way; EXTRACT(DOW ...) counts
            // Sunday as 0, so shift it.
            if f.serializer.is_mysql() {
                fmt!(f, "DAYOFWEEK(" self.expr ")");
            } else {
                fmt!(f, "(EXTRACT(DOW FROM " self.expr ") + 1)");
            }
            return;
        }

        let part = self.part.to_string();
        fmt!(f, "EXTRACT(" part.as_str() " FROM " self.expr ")");
    }
}
