//! The lookup DSL.
//!
//! One raw token is either a boolean connector (`and`/`or`) or a lookup of
//! the shape `<relationPath.>field[__operator]=value`. Parsing is purely
//! lexical; the translator resolves names against the schema afterwards.

mod op;
pub use op::{DateCmp, LookupOp};

use lariat_core::{Error, Result};

/// One parsed filter-call token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Lookup(LookupExpression),
    Connector(Connector),
}

/// Boolean connector between two lookups. The default is `And`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

/// One parsed `field__operator=value` token. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupExpression {
    /// The original token text, kept for diagnostics.
    pub token: String,

    /// Relation segments leading to the entity owning `field`.
    pub path: Vec<String>,

    /// The terminal field name.
    pub field: String,

    pub op: LookupOp,

    /// True when the operator carried a `!` prefix.
    pub negated: bool,

    pub operand: Operand,
}

/// Right-hand side of a lookup, quotes already stripped.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(String),
    List(Vec<String>),
}

/// Parses one raw filter-call token.
pub fn parse(raw: &str) -> Result<Token> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("and") {
        return Ok(Token::Connector(Connector::And));
    }
    if trimmed.eq_ignore_ascii_case("or") {
        return Ok(Token::Connector(Connector::Or));
    }
    parse_lookup(trimmed).map(Token::Lookup)
}

fn parse_lookup(raw: &str) -> Result<LookupExpression> {
    let Some((lhs, rhs)) = raw.split_once('=') else {
        return Err(Error::parse(raw, "missing `=`"));
    };

    let lhs = lhs.trim();
    if lhs.is_empty() {
        return Err(Error::parse(raw, "empty field reference"));
    }

    let mut pieces = lhs.split("__");
    let mut base = pieces.next().unwrap_or_default();
    let mut suffixes: Vec<&str> = pieces.collect();

    let mut negated = false;
    if let Some(rest) = base.strip_prefix('!') {
        negated = !negated;
        base = rest;
    }
    if let Some(first) = suffixes.first_mut() {
        if let Some(rest) = first.strip_prefix('!') {
            negated = !negated;
            *first = rest;
        }
    }

    let op = parse_op(raw, &suffixes)?;

    let mut segments: Vec<&str> = base.split('.').collect();
    let field = segments.pop().unwrap_or_default();
    if field.is_empty() || segments.iter().any(|segment| segment.is_empty()) {
        return Err(Error::parse(raw, "empty field reference"));
    }

    Ok(LookupExpression {
        token: raw.to_string(),
        path: segments.into_iter().map(str::to_string).collect(),
        field: field.to_string(),
        op,
        negated,
        operand: parse_operand(raw, rhs)?,
    })
}

fn parse_op(raw: &str, suffixes: &[&str]) -> Result<LookupOp> {
    match suffixes {
        [] => Ok(LookupOp::Exact),
        [suffix] => LookupOp::from_suffix(suffix)
            .ok_or_else(|| Error::parse(raw, format!("unknown operator `{suffix}`"))),
        [part, cmp] => {
            let Some(LookupOp::DatePart(part, _)) = LookupOp::from_suffix(part) else {
                return Err(Error::parse(raw, format!("unknown operator `{part}__{cmp}`")));
            };
            let cmp = DateCmp::from_suffix(cmp)
                .ok_or_else(|| Error::parse(raw, format!("unknown comparison `{cmp}`")))?;
            Ok(LookupOp::DatePart(part, cmp))
        }
        rest => Err(Error::parse(
            raw,
            format!("unknown operator `{}`", rest.join("__")),
        )),
    }
}

fn parse_operand(raw: &str, rhs: &str) -> Result<Operand> {
    let rhs = rhs.trim();

    if let Some(inner) = rhs.strip_prefix('[') {
        let Some(inner) = inner.strip_suffix(']') else {
            return Err(Error::parse(raw, "unterminated list operand"));
        };
        if inner.trim().is_empty() {
            return Ok(Operand::List(vec![]));
        }
        let items = inner
            .split(',')
            .map(|item| strip_quotes(item.trim()).to_string())
            .collect();
        return Ok(Operand::List(items));
    }

    if !is_quoted(rhs) && rhs.contains('=') {
        return Err(Error::parse(raw, "more than one `=`"));
    }
    Ok(Operand::Literal(strip_quotes(rhs).to_string()))
}

fn is_quoted(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2
        && (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''
            || bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
}

fn strip_quotes(s: &str) -> &str {
    if is_quoted(s) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
