use super::FetchPolicy;
use crate::schema::{EntityDescriptor, EntityId, FieldTy, Schema};

/// One-to-one relation. Stored exactly like a foreign key; the distinction
/// matters to callers modeling cardinality, not to translation.
#[derive(Debug, Clone)]
pub struct OneToOne {
    /// Entity the relation points at
    pub target: EntityId,

    /// How the relation is resolved during hydration
    pub fetch: FetchPolicy,
}

impl OneToOne {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a EntityDescriptor {
        schema.entity(self.target)
    }
}

impl From<OneToOne> for FieldTy {
    fn from(value: OneToOne) -> Self {
        Self::OneToOne(value)
    }
}
