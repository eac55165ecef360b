use lariat_core::schema::{EntityDescriptor, FieldTy, Schema};
use lariat_core::stmt::{Expr, Join, JoinKind, TableRef};
use lariat_core::{Error, Result};

use indexmap::IndexMap;

/// Plans the joins implied by relation paths.
///
/// One join set per unique path prefix, in first-seen order; a prefix shared
/// by several lookups joins once. A many-to-many segment contributes two
/// joins, link table first.
pub(crate) struct JoinPlanner<'a> {
    schema: &'a Schema,
    base: &'a EntityDescriptor,
    joins: IndexMap<String, Vec<Join>>,
}

impl<'a> JoinPlanner<'a> {
    pub(crate) fn new(schema: &'a Schema, base: &'a EntityDescriptor) -> Self {
        Self {
            schema,
            base,
            joins: IndexMap::new(),
        }
    }

    pub(crate) fn into_joins(self) -> Vec<Join> {
        self.joins.into_values().flatten().collect()
    }

    /// Walks a relation path, registering joins for unseen prefixes.
    ///
    /// Returns the entity the path lands on and the qualifier its columns
    /// carry. Base-table columns stay unqualified here; statement assembly
    /// qualifies them when the statement ends up with joins.
    pub(crate) fn resolve_path(
        &mut self,
        path: &[String],
        token: &str,
    ) -> Result<(&'a EntityDescriptor, Option<String>)> {
        let mut entity = self.base;
        let mut qualifier: Option<String> = None;
        let mut prefix = String::new();

        for segment in path {
            let field = entity.field_by_name(segment).ok_or_else(|| {
                Error::parse(
                    token,
                    format!(
                        "`{segment}` is not a declared relation on entity `{}`",
                        entity.name
                    ),
                )
            })?;

            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);

            let owner_qualifier = qualifier
                .clone()
                .unwrap_or_else(|| entity.table_name.clone());

            match &field.ty {
                FieldTy::OneToOne(_) | FieldTy::ForeignKey(_) => {
                    let target = self.schema.entity(
                        field
                            .relation_target()
                            .ok_or_else(|| Error::parse(token, "expected a relation field"))?,
                    );

                    if !self.joins.contains_key(&prefix) {
                        let on = Expr::eq(
                            Expr::qualified_column(owner_qualifier, &field.column_name),
                            Expr::qualified_column(
                                &target.table_name,
                                &target.primary_key_field().column_name,
                            ),
                        );
                        self.joins.insert(
                            prefix.clone(),
                            vec![Join::inner(TableRef::new(&target.table_name), on)],
                        );
                    }

                    qualifier = Some(target.table_name.clone());
                    entity = target;
                }
                FieldTy::ManyToMany(rel) => {
                    let target = rel.target(self.schema);
                    let link = rel.link_table(self.schema, entity);
                    let target_table = rel.target_table(self.schema).to_string();

                    if !self.joins.contains_key(&prefix) {
                        let link_on = Expr::eq(
                            Expr::qualified_column(&link, rel.owner_column(self.schema, entity)),
                            Expr::qualified_column(
                                owner_qualifier,
                                &entity.primary_key_field().column_name,
                            ),
                        );
                        let target_on = Expr::eq(
                            Expr::qualified_column(
                                &target_table,
                                &target.primary_key_field().column_name,
                            ),
                            Expr::qualified_column(&link, rel.target_column(self.schema)),
                        );
                        self.joins.insert(
                            prefix.clone(),
                            vec![
                                Join::inner(TableRef::new(&link), link_on),
                                Join::inner(TableRef::new(&target_table), target_on),
                            ],
                        );
                    }

                    qualifier = Some(target_table);
                    entity = target;
                }
                FieldTy::Scalar(_) => {
                    return Err(Error::parse(
                        token,
                        format!(
                            "`{segment}` is not a declared relation on entity `{}`",
                            entity.name
                        ),
                    ));
                }
            }
        }

        Ok((entity, qualifier))
    }

    /// Introduces an explicit join against a related entity.
    ///
    /// The base entity must declare a relation pointing at the target; the
    /// join reuses that relation's conditions with the requested kind.
    pub(crate) fn join_entity(&mut self, target: &str, kind: JoinKind) -> Result<()> {
        let target = self.schema.expect_entity(target)?;
        let field = self
            .base
            .fields
            .iter()
            .find(|field| field.relation_target() == Some(target.id))
            .ok_or_else(|| {
                Error::relation_configuration(
                    format!("{}.{}", self.base.name, target.name),
                    "no declared relation to join on",
                )
            })?;

        let path = [field.name.clone()];
        self.resolve_path(&path, &field.name)?;
        if let Some(joins) = self.joins.get_mut(field.name.as_str()) {
            for join in joins {
                join.kind = kind;
            }
        }
        Ok(())
    }
}
