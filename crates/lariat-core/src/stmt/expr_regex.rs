use super::Expr;

/// Regular expression match. Serialization is flavor-specific.
#[derive(Debug, Clone)]
pub struct ExprRegex {
    pub expr: Box<Expr>,
    pub pattern: Box<Expr>,
    pub insensitive: bool,
}

impl Expr {
    pub fn regex(expr: impl Into<Self>, pattern: impl Into<Self>, insensitive: bool) -> Self {
        ExprRegex {
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
            insensitive,
        }
        .into()
    }
}

impl From<ExprRegex> for Expr {
    fn from(value: ExprRegex) -> Self {
        Self::Regex(value)
    }
}
