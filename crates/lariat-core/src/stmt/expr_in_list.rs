use super::*;

#[derive(Debug, Clone)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Expr>,
}

impl Expr {
    pub fn in_list(expr: impl Into<Self>, list: Vec<Self>) -> Self {
        ExprInList {
            expr: Box::new(expr.into()),
            list,
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
