use super::*;

/// A predicate or scalar expression.
///
/// Boolean connectors are explicit tree nodes. The engine folds lookup
/// tokens left-to-right at equal precedence, so the tree shape, not token
/// order rewriting, decides evaluation.
#[derive(Debug, Clone)]
pub enum Expr {
    /// AND a set of expressions
    And(ExprAnd),

    /// OR a set of expressions
    Or(ExprOr),

    /// Negate an expression
    Not(ExprNot),

    /// Binary comparison
    BinaryOp(ExprBinaryOp),

    /// References a column, optionally qualified by table
    Column(ExprColumn),

    /// In list
    InList(ExprInList),

    /// Inclusive range check
    Between(ExprBetween),

    /// Whether an expression is (or is not) null. This is different from a
    /// binary comparison because of how databases treat null.
    IsNull(ExprIsNull),

    /// Pattern match with `%`/`_` wildcards
    Like(ExprLike),

    /// Regular expression match
    Regex(ExprRegex),

    /// Extract a date part from a date/time column
    Extract(ExprExtract),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    pub fn as_column(&self) -> Option<&ExprColumn> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_value(&self) -> &Value {
        match self {
            Self::Value(value) => value,
            _ => panic!("expected value expression, but was {self:?}"),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}
