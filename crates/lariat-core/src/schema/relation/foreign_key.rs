use super::FetchPolicy;
use crate::schema::{EntityDescriptor, EntityId, FieldTy, Schema};

/// Many-to-one relation stored as a foreign-key column on the owner row.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    /// Entity the relation points at
    pub target: EntityId,

    /// How the relation is resolved during hydration
    pub fetch: FetchPolicy,
}

impl ForeignKey {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a EntityDescriptor {
        schema.entity(self.target)
    }
}

impl From<ForeignKey> for FieldTy {
    fn from(value: ForeignKey) -> Self {
        Self::ForeignKey(value)
    }
}
