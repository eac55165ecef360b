use super::FetchPolicy;
use crate::schema::{EntityDescriptor, EntityId, FieldTy, Schema};

/// Many-to-many relation resolved through a link table.
#[derive(Debug, Clone)]
pub struct ManyToMany {
    /// Entity the relation points at
    pub target: EntityId,

    /// How the relation is resolved during hydration
    pub fetch: FetchPolicy,

    /// Explicit link entity. When absent, the implicit
    /// `<owner_table>_<target_table>` link table is assumed.
    pub through: Option<EntityId>,

    /// Overrides the target's table name in link queries.
    pub referenced_table: Option<String>,
}

impl ManyToMany {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a EntityDescriptor {
        schema.entity(self.target)
    }

    /// The target table name as seen from the link table.
    pub fn target_table<'a>(&'a self, schema: &'a Schema) -> &'a str {
        match &self.referenced_table {
            Some(table) => table,
            None => &self.target(schema).table_name,
        }
    }

    /// The table holding the link rows.
    pub fn link_table(&self, schema: &Schema, owner: &EntityDescriptor) -> String {
        match self.through {
            Some(through) => schema.entity(through).table_name.clone(),
            None => format!("{}_{}", owner.table_name, self.target_table(schema)),
        }
    }

    /// Column in the link table holding the owner's primary key.
    ///
    /// A through entity's own foreign-key field pointing back at the owner
    /// wins; otherwise the `<owner_table>_id` convention applies.
    pub fn owner_column(&self, schema: &Schema, owner: &EntityDescriptor) -> String {
        if let Some(through) = self.through {
            if let Some(column) = fk_column_for(schema.entity(through), owner.id) {
                return column;
            }
        }
        format!("{}_id", owner.table_name)
    }

    /// Column in the link table holding the target's primary key.
    pub fn target_column(&self, schema: &Schema) -> String {
        if let Some(through) = self.through {
            if let Some(column) = fk_column_for(schema.entity(through), self.target) {
                return column;
            }
        }
        format!("{}_id", self.target_table(schema))
    }
}

fn fk_column_for(through: &EntityDescriptor, target: EntityId) -> Option<String> {
    through
        .fields
        .iter()
        .find(|field| {
            field.ty.is_singular_relation() && field.relation_target() == Some(target)
        })
        .map(|field| field.column_name.clone())
}

impl From<ManyToMany> for FieldTy {
    fn from(value: ManyToMany) -> Self {
        Self::ManyToMany(value)
    }
}
