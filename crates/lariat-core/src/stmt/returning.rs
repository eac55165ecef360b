use super::ExprColumn;

/// Result-row label for count statements.
pub const COUNT_LABEL: &str = "rows";

/// The select list of a statement.
#[derive(Debug, Clone)]
pub enum Returning {
    /// `SELECT *`
    Star,

    /// `SELECT COUNT(col) AS rows`
    Count(ExprColumn),
}

impl Returning {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }
}
