use super::Expr;

/// References a column, optionally qualified by its source table.
///
/// Joined statements qualify columns by table name so duplicate labels stay
/// unambiguous; single-table statements leave the qualifier empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprColumn {
    pub table: Option<String>,
    pub name: String,
}

impl ExprColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// The label under which this column appears in a result row.
    pub fn label(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table, self.name),
            None => self.name.clone(),
        }
    }
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        ExprColumn::new(name).into()
    }

    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        ExprColumn::qualified(table, name).into()
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}
