mod builder;
pub use builder::{Builder, EntityBuilder, FieldBuilder};

mod entity;
pub use entity::{EntityDescriptor, EntityId};

mod field;
pub use field::{FieldDescriptor, FieldId, FieldTy, ScalarTy};

pub mod relation;
pub use relation::{FetchPolicy, ForeignKey, ManyToMany, OneToOne};

use crate::{Error, Result};

use std::collections::HashMap;

/// Immutable registry of entity descriptors.
///
/// Built once through [`Builder`] and shared behind an `Arc` for the process
/// lifetime; nothing re-derives metadata per call.
#[derive(Debug)]
pub struct Schema {
    entities: Vec<EntityDescriptor>,
    by_name: HashMap<String, EntityId>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn entities(&self) -> &[EntityDescriptor] {
        &self.entities
    }

    pub fn entity(&self, id: impl Into<EntityId>) -> &EntityDescriptor {
        &self.entities[id.into().0]
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&EntityDescriptor> {
        self.by_name.get(name).map(|id| self.entity(*id))
    }

    /// Looks up an entity by name, failing with a configuration error.
    pub fn expect_entity(&self, name: &str) -> Result<&EntityDescriptor> {
        self.entity_by_name(name)
            .ok_or_else(|| Error::relation_configuration(name, "unknown entity"))
    }

    pub fn field(&self, id: FieldId) -> &FieldDescriptor {
        self.entity(id.entity).field(id)
    }
}
