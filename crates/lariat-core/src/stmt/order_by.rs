use super::ExprColumn;

use std::fmt;

#[derive(Debug, Clone)]
pub struct OrderBy {
    pub exprs: Vec<OrderByExpr>,
}

#[derive(Debug, Clone)]
pub struct OrderByExpr {
    pub column: ExprColumn,
    pub direction: Direction,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl OrderBy {
    pub fn single(column: ExprColumn, direction: Direction) -> Self {
        Self {
            exprs: vec![OrderByExpr { column, direction }],
        }
    }
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        })
    }
}
