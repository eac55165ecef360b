use super::Expr;

/// Pattern match with `%`/`_` wildcards.
///
/// The pattern is always a string value; literal operand text is escaped
/// before the wildcards are attached, so `%` in user input never widens the
/// match.
#[derive(Debug, Clone)]
pub struct ExprLike {
    pub expr: Box<Expr>,

    /// The full LIKE pattern, wildcards included.
    pub pattern: Box<Expr>,

    /// When `true`, both sides are folded to upper case before matching.
    pub insensitive: bool,
}

impl Expr {
    pub fn like(expr: impl Into<Self>, pattern: impl Into<Self>) -> Self {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
            insensitive: false,
        }
        .into()
    }

    pub fn ilike(expr: impl Into<Self>, pattern: impl Into<Self>) -> Self {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
            insensitive: true,
        }
        .into()
    }
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Self::Like(value)
    }
}
