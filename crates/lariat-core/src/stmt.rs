mod date_part;
pub use date_part::DatePart;

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_between;
pub use expr_between::ExprBetween;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_extract;
pub use expr_extract::ExprExtract;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_like;
pub use expr_like::ExprLike;

mod expr_not;
pub use expr_not::ExprNot;

mod expr_or;
pub use expr_or::ExprOr;

mod expr_regex;
pub use expr_regex::ExprRegex;

mod join;
pub use join::{Join, JoinKind};

mod limit;
pub use limit::Limit;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::{Direction, OrderBy, OrderByExpr};

mod returning;
pub use returning::{Returning, COUNT_LABEL};

mod select;
pub use select::Select;

mod table_ref;
pub use table_ref::TableRef;

mod value;
pub use value::Value;

/// A statement the engine can hand to a driver.
///
/// Only read/delete shapes are produced by the translation engine; inserts
/// and updates belong to the external mutation collaborators.
#[derive(Debug, Clone)]
pub enum Statement {
    Select(Select),
    Delete(Delete),
}

impl Statement {
    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
