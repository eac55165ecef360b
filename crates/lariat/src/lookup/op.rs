use lariat_core::stmt::{BinaryOp, DatePart};

/// The operator part of a lookup token.
///
/// Case-insensitive variants fold both sides during matching. `year` parses
/// as a date part like the others; the translator is what treats it
/// specially.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LookupOp {
    Exact,
    Contains,
    IContains,
    StartsWith,
    IStartsWith,
    EndsWith,
    IEndsWith,
    In,
    Range,
    Lt,
    Lte,
    Gt,
    Gte,
    IsNull,
    Regex,
    IRegex,
    DatePart(DatePart, DateCmp),
}

/// Comparison applied to an extracted date part. Bare parts mean equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DateCmp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl LookupOp {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "exact" => Self::Exact,
            "contains" => Self::Contains,
            "icontains" => Self::IContains,
            "startswith" => Self::StartsWith,
            "istartswith" => Self::IStartsWith,
            "endswith" => Self::EndsWith,
            "iendswith" => Self::IEndsWith,
            "in" => Self::In,
            "range" => Self::Range,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "isnull" => Self::IsNull,
            "regex" => Self::Regex,
            "iregex" => Self::IRegex,
            part => Self::DatePart(DatePart::from_keyword(part)?, DateCmp::Eq),
        })
    }
}

impl DateCmp {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "exact" => Self::Eq,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            _ => return None,
        })
    }

    pub fn binary_op(self) -> BinaryOp {
        match self {
            Self::Eq => BinaryOp::Eq,
            Self::Lt => BinaryOp::Lt,
            Self::Lte => BinaryOp::Le,
            Self::Gt => BinaryOp::Gt,
            Self::Gte => BinaryOp::Ge,
        }
    }
}
