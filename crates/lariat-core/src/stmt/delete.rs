use super::*;

/// A translated delete statement.
#[derive(Debug, Clone)]
pub struct Delete {
    pub from: TableRef,
    pub filter: Option<Expr>,
}

impl Delete {
    pub fn new(from: TableRef, filter: Option<Expr>) -> Self {
        Self { from, filter }
    }
}
