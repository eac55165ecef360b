use super::{FieldDescriptor, FieldId};

use std::fmt;

/// Static metadata for one record type.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    /// Uniquely identifies the entity within the schema
    pub id: EntityId,

    /// Name of the entity as used in lookup paths
    pub name: String,

    /// Table the entity maps to
    pub table_name: String,

    /// The primary key field
    pub primary_key: FieldId,

    /// Fields contained by the entity, in declaration order
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct EntityId(pub usize);

impl EntityDescriptor {
    pub fn field(&self, field: impl Into<FieldId>) -> &FieldDescriptor {
        let field_id = field.into();
        assert_eq!(self.id, field_id.entity);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn primary_key_field(&self) -> &FieldDescriptor {
        &self.fields[self.primary_key.index]
    }
}

impl EntityId {
    /// Create a `FieldId` for this entity's field at `index`.
    pub const fn field(self, index: usize) -> FieldId {
        FieldId {
            entity: self,
            index,
        }
    }
}

impl From<&EntityDescriptor> for EntityId {
    fn from(value: &EntityDescriptor) -> Self {
        value.id
    }
}

impl From<&Self> for EntityId {
    fn from(value: &Self) -> Self {
        *value
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityId({})", self.0)
    }
}
