use super::*;

/// Inclusive range check, serialized as `BETWEEN lo AND hi`.
#[derive(Debug, Clone)]
pub struct ExprBetween {
    pub expr: Box<Expr>,
    pub lo: Box<Expr>,
    pub hi: Box<Expr>,
}

impl Expr {
    pub fn between(expr: impl Into<Self>, lo: impl Into<Self>, hi: impl Into<Self>) -> Self {
        ExprBetween {
            expr: Box::new(expr.into()),
            lo: Box::new(lo.into()),
            hi: Box::new(hi.into()),
        }
        .into()
    }
}

impl From<ExprBetween> for Expr {
    fn from(value: ExprBetween) -> Self {
        Self::Between(value)
    }
}
