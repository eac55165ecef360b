use super::{
    EntityDescriptor, EntityId, FetchPolicy, FieldDescriptor, FieldTy, ForeignKey, ManyToMany,
    OneToOne, ScalarTy, Schema,
};
use crate::{bail, Error, Result};

use std::collections::HashMap;

/// Builds a [`Schema`] from entity declarations.
///
/// Relation targets are declared by entity name and resolved to ids in one
/// pass at build time. Broken relation metadata fails the build with a
/// [`RelationConfiguration`](crate::Error::is_relation_configuration) error
/// instead of surfacing later mid-query.
#[derive(Debug, Default)]
pub struct Builder {
    entities: Vec<EntityBuilder>,
}

#[derive(Debug)]
pub struct EntityBuilder {
    name: String,
    table: Option<String>,
    fields: Vec<FieldBuilder>,
}

#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    column: Option<String>,
    kind: FieldKind,
    nullable: bool,
    primary_key: bool,
    fetch: FetchPolicy,
    through: Option<String>,
    referenced_table: Option<String>,
}

#[derive(Debug)]
enum FieldKind {
    Scalar(ScalarTy),
    OneToOne(String),
    ForeignKey(String),
    ManyToMany(String),
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(mut self, entity: EntityBuilder) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut by_name = HashMap::new();

        for (index, entity) in self.entities.iter().enumerate() {
            if by_name.insert(entity.name.clone(), EntityId(index)).is_some() {
                bail!("duplicate entity `{}`", entity.name);
            }
        }

        let entities = self
            .entities
            .iter()
            .enumerate()
            .map(|(index, entity)| entity.build(EntityId(index), &by_name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Schema { entities, by_name })
    }
}

impl EntityBuilder {
    /// Starts an entity. The table name defaults to the entity name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            fields: vec![],
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Adds the conventional `id` integer primary key.
    pub fn id(self) -> Self {
        self.field(FieldBuilder::integer("id").primary_key())
    }

    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    fn build(&self, id: EntityId, by_name: &HashMap<String, EntityId>) -> Result<EntityDescriptor> {
        let table_name = self.table.clone().unwrap_or_else(|| self.name.clone());

        let fields = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| field.build(&self.name, id.field(index), by_name))
            .collect::<Result<Vec<_>>>()?;

        let mut primary_keys = fields.iter().filter(|field| field.primary_key);
        let Some(primary_key) = primary_keys.next() else {
            bail!("entity `{}` has no primary key field", self.name);
        };
        if primary_keys.next().is_some() {
            bail!("entity `{}` declares more than one primary key", self.name);
        }
        if !primary_key.ty.is_scalar() {
            bail!(
                "entity `{}` primary key `{}` must be a scalar field",
                self.name,
                primary_key.name
            );
        }

        Ok(EntityDescriptor {
            id,
            name: self.name.clone(),
            table_name,
            primary_key: primary_key.id,
            fields,
        })
    }
}

impl FieldBuilder {
    pub fn scalar(name: impl Into<String>, ty: ScalarTy) -> Self {
        Self::new(name, FieldKind::Scalar(ty))
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarTy::Bool)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarTy::I64)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarTy::F64)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarTy::Text)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarTy::Date)
    }

    pub fn time(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarTy::Time)
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarTy::DateTime)
    }

    pub fn one_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, FieldKind::OneToOne(target.into()))
    }

    pub fn foreign_key(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, FieldKind::ForeignKey(target.into()))
    }

    pub fn many_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, FieldKind::ManyToMany(target.into()))
    }

    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            column: None,
            kind,
            nullable: false,
            primary_key: false,
            fetch: FetchPolicy::Unset,
            through: None,
            referenced_table: None,
        }
    }

    /// Overrides the storage column name.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn eager(mut self) -> Self {
        self.fetch = FetchPolicy::Eager;
        self
    }

    pub fn lazy(mut self) -> Self {
        self.fetch = FetchPolicy::Lazy;
        self
    }

    /// Declares an explicit link entity for a many-to-many field.
    pub fn through(mut self, entity: impl Into<String>) -> Self {
        self.through = Some(entity.into());
        self
    }

    /// Overrides the target table name used in link queries.
    pub fn referenced_table(mut self, table: impl Into<String>) -> Self {
        self.referenced_table = Some(table.into());
        self
    }

    fn build(
        &self,
        entity_name: &str,
        id: super::FieldId,
        by_name: &HashMap<String, EntityId>,
    ) -> Result<FieldDescriptor> {
        let at = || format!("{}.{}", entity_name, self.name);

        let resolve = |target: &str| -> Result<EntityId> {
            by_name.get(target).copied().ok_or_else(|| {
                Error::relation_configuration(at(), format!("unknown target entity `{target}`"))
            })
        };

        let ty = match &self.kind {
            FieldKind::Scalar(ty) => FieldTy::Scalar(*ty),
            FieldKind::OneToOne(target) => OneToOne {
                target: resolve(target)?,
                fetch: self.fetch,
            }
            .into(),
            FieldKind::ForeignKey(target) => ForeignKey {
                target: resolve(target)?,
                fetch: self.fetch,
            }
            .into(),
            FieldKind::ManyToMany(target) => ManyToMany {
                target: resolve(target)?,
                fetch: self.fetch,
                through: match &self.through {
                    Some(through) => Some(by_name.get(through).copied().ok_or_else(|| {
                        Error::relation_configuration(
                            at(),
                            format!("unknown through entity `{through}`"),
                        )
                    })?),
                    None => None,
                },
                referenced_table: self.referenced_table.clone(),
            }
            .into(),
        };

        let column_name = self.column.clone().unwrap_or_else(|| match &self.kind {
            // Foreign keys reference the fk column, not the related table
            FieldKind::OneToOne(_) | FieldKind::ForeignKey(_) => format!("{}_id", self.name),
            _ => self.name.clone(),
        });

        Ok(FieldDescriptor {
            id,
            name: self.name.clone(),
            column_name,
            ty,
            nullable: self.nullable,
            primary_key: self.primary_key,
        })
    }
}
