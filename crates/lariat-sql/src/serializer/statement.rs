use super::{Comma, Formatter, Ident, ToSql};

use lariat_core::stmt;

impl ToSql for &stmt::Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "SELECT ");

        if let Some(columns) = &self.distinct {
            if columns.is_empty() {
                fmt!(f, "DISTINCT ");
            } else {
                fmt!(f, "DISTINCT " Comma(columns) " ");
                // DISTINCT on named columns replaces the select list
                fmt_tail(self, f);
                return;
            }
        }

        fmt!(f, self.returning);
        fmt_tail(self, f);
    }
}

fn fmt_tail(select: &stmt::Select, f: &mut Formatter<'_>) {
    fmt!(f, "FROM " select.from);

    for join in &select.joins {
        fmt!(f, " " join);
    }

    let filter = select.filter.as_ref().map(|expr| (" WHERE ", expr));
    let order_by = select.order_by.as_ref().map(|order_by| (" ", order_by));
    let limit = select.limit.as_ref().map(|limit| (" ", limit));

    fmt!(f, filter order_by limit);
}

impl ToSql for &stmt::Returning {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Returning::Star => fmt!(f, "* "),
            stmt::Returning::Count(column) => {
                fmt!(f, "COUNT(" column ") AS " stmt::COUNT_LABEL " ");
            }
        }
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let filter = self.filter.as_ref().map(|expr| (" WHERE ", expr));
        fmt!(f, "DELETE FROM " self.from filter);
    }
}

impl ToSql for &stmt::TableRef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let alias = self.alias.as_ref().map(|alias| (" AS ", Ident(alias)));
        fmt!(f, Ident(&self.table) alias);
    }
}

impl ToSql for &stmt::Join {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let kind = self.kind.to_string();
        fmt!(f, kind.as_str() " " self.table " ON " self.on);
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "ORDER BY " Comma(&self.exprs));
    }
}

impl ToSql for &stmt::OrderByExpr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let direction = self.direction.to_string();
        fmt!(f, self.column " " direction.as_str());
    }
}

impl ToSql for &stmt::Limit {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "LIMIT " self.limit);

        if let Some(offset) = self.offset {
            fmt!(f, " OFFSET " offset);
        }
    }
}
