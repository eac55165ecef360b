use super::*;

/// A translated read statement.
///
/// Joins are stored in insertion order; deduplication happens in the join
/// planner before they land here. The result set always hydrates against
/// one primary entity, no matter how many tables the joins attach.
#[derive(Debug, Clone)]
pub struct Select {
    pub returning: Returning,
    pub from: TableRef,
    pub joins: Vec<Join>,
    pub filter: Option<Expr>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
    pub distinct: Option<Vec<ExprColumn>>,
}

impl Select {
    pub fn new(from: TableRef) -> Self {
        Self {
            returning: Returning::Star,
            from,
            joins: vec![],
            filter: None,
            order_by: None,
            limit: None,
            distinct: None,
        }
    }

    /// AND an expression onto the filter.
    pub fn and_filter(&mut self, expr: Expr) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr,
        });
    }
}
