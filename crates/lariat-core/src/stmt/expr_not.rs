use super::Expr;

/// Logical negation of a predicate.
#[derive(Debug, Clone)]
pub struct ExprNot {
    pub operand: Box<Expr>,
}

impl Expr {
    pub fn not(operand: impl Into<Self>) -> Self {
        // Double negation cancels out
        match operand.into() {
            Self::Not(not) => *not.operand,
            operand => ExprNot {
                operand: Box::new(operand),
            }
            .into(),
        }
    }
}

impl From<ExprNot> for Expr {
    fn from(value: ExprNot) -> Self {
        Self::Not(value)
    }
}
