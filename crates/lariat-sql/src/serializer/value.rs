use super::{Delimited, Formatter, ToSql};

use lariat_core::stmt;

impl ToSql for &stmt::Value {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use stmt::Value::*;

        match self {
            Null => fmt!(f, "NULL"),
            Bool(true) => fmt!(f, "TRUE"),
            Bool(false) => fmt!(f, "FALSE"),
            I64(value) => f.dst.push_str(&value.to_string()),
            F64(value) => f.dst.push_str(&value.to_string()),
            String(value) => push_quoted(f, value),
            Date(value) => push_quoted(f, &value.format("%Y-%m-%d").to_string()),
            Time(value) => push_quoted(f, &value.format("%H:%M:%S").to_string()),
            DateTime(value) => push_quoted(f, &value.format("%Y-%m-%d %H:%M:%S").to_string()),
            List(values) => {
                let items = Delimited(values, ", ");
                fmt!(f, "(" items ")");
            }
        }
    }
}

/// Single-quoted literal with embedded quotes doubled.
fn push_quoted(f: &mut Formatter<'_>, value: &str) {
    f.dst.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            f.dst.push('\'');
        }
        f.dst.push(ch);
    }
    f.dst.push('\'');
}
