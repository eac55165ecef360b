//! Relationship resolution during hydration.
//!
//! Each relation field of a row moves through one of three terminal states:
//! null (eager, but the foreign key was null), lazy-skipped (left empty for
//! the caller to fetch later), or eager-resolved (nested fetch issued).
//! Eager resolution is one extra round-trip per relation per row; that N+1
//! cost is the documented contract, not an accident.
//!
//! Nested fetches carry the (entity, primary key) pairs already being
//! hydrated. A record that reappears on its own path keeps lazy relation
//! slots, so mutually eager relations terminate.

use crate::hydrate::{self, FieldValue};
use crate::manager::Manager;

use lariat_core::driver::Row;
use lariat_core::schema::{
    EntityDescriptor, EntityId, FetchPolicy, FieldDescriptor, FieldTy, ManyToMany,
};
use lariat_core::stmt::{Expr, Select, Statement, TableRef, Value};
use lariat_core::{bail, Result};

pub(crate) fn resolve(
    manager: &Manager,
    owner: &EntityDescriptor,
    field: &FieldDescriptor,
    row: &Row,
    owner_pk: &Value,
    ancestry: &[(EntityId, Value)],
) -> Result<FieldValue> {
    let policy = field
        .fetch_policy()
        .unwrap_or(FetchPolicy::Unset)
        .or_default(manager.config().default_fetch);

    match &field.ty {
        FieldTy::OneToOne(rel) => {
            singular(manager, owner, field, row, rel.target, policy, ancestry)
        }
        FieldTy::ForeignKey(rel) => {
            singular(manager, owner, field, row, rel.target, policy, ancestry)
        }
        FieldTy::ManyToMany(rel) => collection(manager, owner, rel, owner_pk, policy, ancestry),
        FieldTy::Scalar(_) => bail!("field `{}` is not a relation", field.name),
    }
}

/// The lazy terminal state of a relation slot.
pub(crate) fn placeholder(field: &FieldDescriptor) -> FieldValue {
    match &field.ty {
        FieldTy::ManyToMany(_) => FieldValue::Many(vec![]),
        _ => FieldValue::Value(Value::Null),
    }
}

fn singular(
    manager: &Manager,
    owner: &EntityDescriptor,
    field: &FieldDescriptor,
    row: &Row,
    target: EntityId,
    policy: FetchPolicy,
    ancestry: &[(EntityId, Value)],
) -> Result<FieldValue> {
    if !policy.is_eager() {
        return Ok(FieldValue::Value(Value::Null));
    }

    let fk = hydrate::read_column(row, &owner.table_name, &field.column_name);
    if fk.is_null() {
        return Ok(FieldValue::Value(Value::Null));
    }

    let record = manager.for_entity(target).get_by_id_within(fk, ancestry)?;
    Ok(FieldValue::One(Box::new(record)))
}

fn collection(
    manager: &Manager,
    owner: &EntityDescriptor,
    rel: &ManyToMany,
    owner_pk: &Value,
    policy: FetchPolicy,
    ancestry: &[(EntityId, Value)],
) -> Result<FieldValue> {
    if !policy.is_eager() {
        return Ok(FieldValue::Many(vec![]));
    }

    let schema = manager.schema();
    let link_table = rel.link_table(schema, owner);
    let owner_column = rel.owner_column(schema, owner);
    let target_column = rel.target_column(schema);

    // Step one: collect target ids from the link table.
    let mut select = Select::new(TableRef::new(&link_table));
    select.filter = Some(Expr::eq(
        Expr::column(&owner_column),
        Expr::Value(owner_pk.clone()),
    ));
    let rows = manager.run(Statement::Select(select))?.into_rows()?;

    let ids = rows
        .iter()
        .map(|row| row.expect(&target_column).cloned())
        .collect::<Result<Vec<_>>>()?;

    // An empty id list is an empty collection, never null.
    if ids.is_empty() {
        return Ok(FieldValue::Many(vec![]));
    }

    // Step two: one IN (...) fetch against the target's own gateway.
    let records = manager
        .for_entity(rel.target)
        .records_by_ids(ids, ancestry)?;
    Ok(FieldValue::Many(records))
}
