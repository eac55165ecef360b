use super::{EntityId, FetchPolicy, ForeignKey, ManyToMany, OneToOne};

use std::fmt;

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Uniquely identifies the field within the containing entity.
    pub id: FieldId,

    /// The field name
    pub name: String,

    /// The column the field maps to. Foreign-key fields default to
    /// `<name>_id`; many-to-many fields carry no owner-table column and the
    /// value here is unused.
    pub column_name: String,

    /// Scalar or relation kind
    pub ty: FieldTy,

    /// True if the column can hold null
    pub nullable: bool,

    /// True if the field is the primary key
    pub primary_key: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub entity: EntityId,
    pub index: usize,
}

#[derive(Clone)]
pub enum FieldTy {
    Scalar(ScalarTy),
    OneToOne(OneToOne),
    ForeignKey(ForeignKey),
    ManyToMany(ManyToMany),
}

/// Storage type of a scalar field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScalarTy {
    Bool,
    I64,
    F64,
    Text,
    Date,
    Time,
    DateTime,
}

impl FieldDescriptor {
    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }

    /// True if the field occupies a column in the owner's table.
    ///
    /// Everything except many-to-many does; that relation lives entirely in
    /// the link table.
    pub fn has_column(&self) -> bool {
        !matches!(self.ty, FieldTy::ManyToMany(_))
    }

    /// If the field is a relation, the target entity.
    pub fn relation_target(&self) -> Option<EntityId> {
        match &self.ty {
            FieldTy::OneToOne(rel) => Some(rel.target),
            FieldTy::ForeignKey(rel) => Some(rel.target),
            FieldTy::ManyToMany(rel) => Some(rel.target),
            FieldTy::Scalar(_) => None,
        }
    }

    /// If the field is a relation, its declared fetch policy.
    pub fn fetch_policy(&self) -> Option<FetchPolicy> {
        match &self.ty {
            FieldTy::OneToOne(rel) => Some(rel.fetch),
            FieldTy::ForeignKey(rel) => Some(rel.fetch),
            FieldTy::ManyToMany(rel) => Some(rel.fetch),
            FieldTy::Scalar(_) => None,
        }
    }
}

impl FieldTy {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<ScalarTy> {
        match self {
            Self::Scalar(ty) => Some(*ty),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_scalar(&self) -> ScalarTy {
        match self {
            Self::Scalar(ty) => *ty,
            _ => panic!("expected scalar field, but was {self:?}"),
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            Self::OneToOne(..) | Self::ForeignKey(..) | Self::ManyToMany(..)
        )
    }

    /// True for relations stored as a foreign-key column on the owner row.
    pub fn is_singular_relation(&self) -> bool {
        matches!(self, Self::OneToOne(..) | Self::ForeignKey(..))
    }

    pub fn as_foreign_key(&self) -> Option<&ForeignKey> {
        match self {
            Self::ForeignKey(fk) => Some(fk),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_foreign_key(&self) -> &ForeignKey {
        match self {
            Self::ForeignKey(fk) => fk,
            _ => panic!("expected field to be `ForeignKey`, but was {self:?}"),
        }
    }

    pub fn is_many_to_many(&self) -> bool {
        matches!(self, Self::ManyToMany(..))
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToMany> {
        match self {
            Self::ManyToMany(rel) => Some(rel),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_many_to_many(&self) -> &ManyToMany {
        match self {
            Self::ManyToMany(rel) => rel,
            _ => panic!("expected field to be `ManyToMany`, but was {self:?}"),
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(ty) => ty.fmt(fmt),
            Self::OneToOne(ty) => ty.fmt(fmt),
            Self::ForeignKey(ty) => ty.fmt(fmt),
            Self::ManyToMany(ty) => ty.fmt(fmt),
        }
    }
}

impl From<&FieldDescriptor> for FieldId {
    fn from(value: &FieldDescriptor) -> Self {
        value.id
    }
}

impl From<&Self> for FieldId {
    fn from(value: &Self) -> Self {
        *value
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.entity.0, self.index)
    }
}
