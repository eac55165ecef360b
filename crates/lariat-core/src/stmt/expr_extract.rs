use super::*;

/// Extract a date part from a date/time expression.
///
/// `year` lookups never reach this node; the translator rewrites them to
/// literal date comparisons instead.
#[derive(Debug, Clone)]
pub struct ExprExtract {
    pub part: DatePart,
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn extract(part: DatePart, expr: impl Into<Self>) -> Self {
        ExprExtract {
            part,
            expr: Box::new(expr.into()),
        }
        .into()
    }
}

impl From<ExprExtract> for Expr {
    fn from(value: ExprExtract) -> Self {
        Self::Extract(value)
    }
}
