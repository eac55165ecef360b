use crate::translate::Translator;

use lariat_core::schema::{EntityDescriptor, Schema};
use lariat_core::stmt::{
    Delete, Direction, Expr, ExprColumn, Join, JoinKind, Limit, OrderBy, OrderByExpr, Returning,
    Select, TableRef,
};
use lariat_core::{bail, Error, Result};

/// An immutable query description.
///
/// Every chaining call consumes the value and returns a new one, so two
/// chains forked from a clone never alias state. Names are resolved against
/// the schema at build time, not while chaining.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<Vec<String>>,
    excludes: Vec<Vec<String>>,
    order: Vec<String>,
    distinct: Option<Vec<String>>,
    joins: Vec<(String, JoinKind)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group of lookup tokens. Groups from separate calls are ANDed.
    pub fn filter(mut self, tokens: &[&str]) -> Self {
        if !tokens.is_empty() {
            self.filters.push(owned(tokens));
        }
        self
    }

    /// Like [`filter`](Self::filter), with the whole group negated.
    pub fn exclude(mut self, tokens: &[&str]) -> Self {
        if !tokens.is_empty() {
            self.excludes.push(owned(tokens));
        }
        self
    }

    /// Orders by the given fields; a leading `-` means descending.
    pub fn order_by(mut self, fields: &[&str]) -> Self {
        self.order.extend(owned(fields));
        self
    }

    pub fn distinct(mut self, fields: &[&str]) -> Self {
        self.distinct = Some(owned(fields));
        self
    }

    /// Joins a related entity explicitly, e.g. to force a LEFT JOIN.
    pub fn join(mut self, entity: &str, kind: JoinKind) -> Self {
        self.joins.push((entity.to_string(), kind));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn build_select(
        &self,
        schema: &Schema,
        entity: &EntityDescriptor,
    ) -> Result<Select> {
        let (filter, joins) = self.predicate(schema, entity)?;

        let mut select = Select::new(TableRef::new(&entity.table_name));
        select.filter = filter;
        select.order_by = self.order_clause(entity)?;
        select.distinct = match &self.distinct {
            Some(fields) => Some(
                fields
                    .iter()
                    .map(|field| Ok(ExprColumn::new(column_for(entity, field)?)))
                    .collect::<Result<_>>()?,
            ),
            None => None,
        };
        select.limit = match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => Some(Limit::with_offset(limit, offset)),
            (Some(limit), None) => Some(Limit::new(limit)),
            // Most dialects refuse OFFSET without a LIMIT clause
            (None, Some(offset)) => Some(Limit::with_offset(u64::MAX, offset)),
            (None, None) => None,
        };

        if !joins.is_empty() {
            qualify_select(&mut select, &entity.table_name);
        }
        select.joins = joins;

        Ok(select)
    }

    /// Builds the counting variant: the select list becomes
    /// `COUNT(<table>.<pk>) AS rows` and row-shaping clauses drop away.
    pub(crate) fn build_count(
        &self,
        schema: &Schema,
        entity: &EntityDescriptor,
    ) -> Result<Select> {
        let mut select = self.build_select(schema, entity)?;
        select.returning = Returning::Count(ExprColumn::qualified(
            &entity.table_name,
            &entity.primary_key_field().column_name,
        ));
        select.order_by = None;
        select.limit = None;
        select.distinct = None;
        Ok(select)
    }

    pub(crate) fn build_delete(
        &self,
        schema: &Schema,
        entity: &EntityDescriptor,
    ) -> Result<Delete> {
        let (filter, joins) = self.predicate(schema, entity)?;
        if !joins.is_empty() {
            bail!("delete filters cannot traverse relations");
        }
        Ok(Delete::new(TableRef::new(&entity.table_name), filter))
    }

    fn predicate(
        &self,
        schema: &Schema,
        entity: &EntityDescriptor,
    ) -> Result<(Option<Expr>, Vec<Join>)> {
        let mut translator = Translator::new(schema, entity);

        for (target, kind) in &self.joins {
            translator.join_entity(target, *kind)?;
        }

        let mut filter: Option<Expr> = None;
        let mut and = |expr: Expr| {
            filter = Some(match filter.take() {
                Some(prev) => Expr::and(prev, expr),
                None => expr,
            });
        };

        for group in &self.filters {
            if let Some(expr) = translator.predicate(group)? {
                and(expr);
            }
        }
        for group in &self.excludes {
            if let Some(expr) = translator.predicate(group)? {
                and(Expr::not(expr));
            }
        }

        Ok((filter, translator.into_joins()))
    }

    fn order_clause(&self, entity: &EntityDescriptor) -> Result<Option<OrderBy>> {
        if self.order.is_empty() {
            return Ok(None);
        }

        let exprs = self
            .order
            .iter()
            .map(|spec| {
                let (name, direction) = match spec.strip_prefix('-') {
                    Some(rest) => (rest, Direction::Desc),
                    None => (spec.as_str(), Direction::Asc),
                };
                Ok(OrderByExpr {
                    column: ExprColumn::new(column_for(entity, name)?),
                    direction,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Some(OrderBy { exprs }))
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn column_for<'e>(entity: &'e EntityDescriptor, field: &str) -> Result<&'e str> {
    let field = entity
        .field_by_name(field)
        .ok_or_else(|| {
            Error::parse(
                field,
                format!("unknown field on entity `{}`", entity.name),
            )
        })?;
    if !field.has_column() {
        return Err(Error::parse(
            &field.name,
            format!("field has no storage column on entity `{}`", entity.name),
        ));
    }
    Ok(&field.column_name)
}

/// Qualifies bare base-table columns once the statement has joins, so
/// duplicate labels across tables stay unambiguous.
fn qualify_select(select: &mut Select, table: &str) {
    if let Some(filter) = &mut select.filter {
        qualify_expr(filter, table);
    }
    if let Some(order_by) = &mut select.order_by {
        for expr in &mut order_by.exprs {
            qualify_column(&mut expr.column, table);
        }
    }
    if let Some(distinct) = &mut select.distinct {
        for column in distinct {
            qualify_column(column, table);
        }
    }
}

fn qualify_column(column: &mut ExprColumn, table: &str) {
    if column.table.is_none() {
        column.table = Some(table.to_string());
    }
}

fn qualify_expr(expr: &mut Expr, table: &str) {
    match expr {
        Expr::Column(column) => qualify_column(column, table),
        Expr::And(and) => {
            for operand in &mut and.operands {
                qualify_expr(operand, table);
            }
        }
        Expr::Or(or) => {
            for operand in &mut or.operands {
                qualify_expr(operand, table);
            }
        }
        Expr::Not(not) => qualify_expr(&mut not.operand, table),
        Expr::BinaryOp(op) => {
            qualify_expr(&mut op.lhs, table);
            qualify_expr(&mut op.rhs, table);
        }
        Expr::InList(in_list) => {
            qualify_expr(&mut in_list.expr, table);
            for item in &mut in_list.list {
                qualify_expr(item, table);
            }
        }
        Expr::Between(between) => {
            qualify_expr(&mut between.expr, table);
            qualify_expr(&mut between.lo, table);
            qualify_expr(&mut between.hi, table);
        }
        Expr::IsNull(is_null) => qualify_expr(&mut is_null.expr, table),
        Expr::Like(like) => qualify_expr(&mut like.expr, table),
        Expr::Regex(regex) => qualify_expr(&mut regex.expr, table),
        Expr::Extract(extract) => qualify_expr(&mut extract.expr, table),
        Expr::Value(_) => {}
    }
}
