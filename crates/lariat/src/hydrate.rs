//! Row hydration: one result row in, one typed record out.

use crate::manager::Manager;
use crate::relation;

use lariat_core::driver::Row;
use lariat_core::schema::{EntityDescriptor, EntityId, FieldDescriptor, FieldTy, ScalarTy};
use lariat_core::stmt::Value;
use lariat_core::{Error, Result};

use indexmap::IndexMap;

/// A hydrated instance of an entity.
///
/// Owned by the caller once hydration finishes; there is no shared record
/// cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entity: EntityId,
    persisted: bool,
    pk: Value,
    fields: IndexMap<String, FieldValue>,
}

/// One field slot of a record.
///
/// Relation fields hold a nested record or collection when eagerly
/// resolved, and a null value / empty collection otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Value),
    One(Box<Record>),
    Many(Vec<Record>),
}

impl Record {
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// True once the record has round-tripped through storage. Holds iff
    /// the primary key is non-zero and non-null.
    pub fn persisted(&self) -> bool {
        self.persisted
    }

    pub fn primary_key(&self) -> &Value {
        &self.pk
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// The scalar value of a field, or `None` for relation slots holding
    /// records.
    pub fn value(&self, field: &str) -> Option<&Value> {
        match self.fields.get(field) {
            Some(FieldValue::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// The eagerly resolved record behind a singular relation field.
    pub fn one(&self, field: &str) -> Option<&Record> {
        match self.fields.get(field) {
            Some(FieldValue::One(record)) => Some(record),
            _ => None,
        }
    }

    /// The eagerly resolved collection behind a many-to-many field.
    pub fn many(&self, field: &str) -> Option<&[Record]> {
        match self.fields.get(field) {
            Some(FieldValue::Many(records)) => Some(records),
            _ => None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

pub(crate) struct Hydrator<'a> {
    manager: &'a Manager,
    entity: &'a EntityDescriptor,
    /// (entity, primary key) pairs of the records whose eager fetches led
    /// here, outermost first.
    ancestry: &'a [(EntityId, Value)],
}

impl<'a> Hydrator<'a> {
    pub(crate) fn new(
        manager: &'a Manager,
        entity: &'a EntityDescriptor,
        ancestry: &'a [(EntityId, Value)],
    ) -> Self {
        Self {
            manager,
            entity,
            ancestry,
        }
    }

    pub(crate) fn hydrate(&self, row: &Row) -> Result<Record> {
        // The primary key is read first; everything else keys off it.
        let pk = self.read_scalar(row, self.entity.primary_key_field())?;
        let persisted = is_persisted(&pk);

        // A record already on the hydration path keeps lazy relation slots,
        // which bounds eager resolution over mutually related entities.
        let on_path = self
            .ancestry
            .iter()
            .any(|(entity, id)| *entity == self.entity.id && *id == pk);
        let mut path = Vec::with_capacity(self.ancestry.len() + 1);
        path.extend_from_slice(self.ancestry);
        path.push((self.entity.id, pk.clone()));

        let mut fields = IndexMap::with_capacity(self.entity.fields.len());
        for field in &self.entity.fields {
            let value = match &field.ty {
                FieldTy::Scalar(_) => FieldValue::Value(self.read_scalar(row, field)?),
                _ if on_path => relation::placeholder(field),
                _ => relation::resolve(self.manager, self.entity, field, row, &pk, &path)?,
            };
            fields.insert(field.name.clone(), value);
        }

        Ok(Record {
            entity: self.entity.id,
            persisted,
            pk,
            fields,
        })
    }

    fn read_scalar(&self, row: &Row, field: &FieldDescriptor) -> Result<Value> {
        let value = read_column(row, &self.entity.table_name, &field.column_name);
        let Some(ty) = field.ty.as_scalar() else {
            return Ok(value);
        };
        coerce_scalar(value, ty)
    }
}

/// Reads a column preferring the table-qualified label of joined rows.
pub(crate) fn read_column(row: &Row, table: &str, column: &str) -> Value {
    let qualified = format!("{table}.{column}");
    row.get(&qualified)
        .or_else(|| row.get(column))
        .cloned()
        .unwrap_or(Value::Null)
}

fn is_persisted(pk: &Value) -> bool {
    match pk {
        Value::Null => false,
        Value::I64(n) => *n != 0,
        Value::F64(f) => *f != 0.0,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Coerces a raw driver value to the field's declared storage type.
///
/// Legacy numeric drivers report integer columns as fixed-point decimal;
/// those normalize to native integers. Zero-value dates coerce to null
/// rather than a sentinel date.
pub(crate) fn coerce_scalar(value: Value, ty: ScalarTy) -> Result<Value> {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    Ok(match (ty, value) {
        (_, Value::Null) => Value::Null,

        (ScalarTy::Bool, Value::Bool(v)) => Value::Bool(v),
        (ScalarTy::Bool, Value::I64(n)) if n == 0 || n == 1 => Value::Bool(n == 1),

        (ScalarTy::I64, Value::I64(n)) => Value::I64(n),
        (ScalarTy::I64, Value::F64(f)) if f.fract() == 0.0 => Value::I64(f as i64),
        (ScalarTy::I64, Value::String(s)) => match s.parse::<i64>() {
            Ok(n) => Value::I64(n),
            Err(_) => match s.parse::<f64>() {
                Ok(f) if f.fract() == 0.0 => Value::I64(f as i64),
                _ => return Err(Error::type_conversion(Value::String(s), "i64")),
            },
        },

        (ScalarTy::F64, Value::F64(f)) => Value::F64(f),
        (ScalarTy::F64, Value::I64(n)) => Value::F64(n as f64),

        (ScalarTy::Text, Value::String(s)) => Value::String(s),

        (ScalarTy::Date, Value::Date(d)) => Value::Date(d),
        (ScalarTy::Date, Value::DateTime(dt)) => Value::Date(dt.date()),
        (ScalarTy::Date, Value::String(s)) => {
            if is_zero_date(&s) {
                Value::Null
            } else {
                match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                    Ok(d) => Value::Date(d),
                    Err(_) => return Err(Error::type_conversion(Value::String(s), "date")),
                }
            }
        }

        (ScalarTy::Time, Value::Time(t)) => Value::Time(t),
        (ScalarTy::Time, Value::String(s)) => {
            match NaiveTime::parse_from_str(&s, "%H:%M:%S") {
                Ok(t) => Value::Time(t),
                Err(_) => return Err(Error::type_conversion(Value::String(s), "time")),
            }
        }

        (ScalarTy::DateTime, Value::DateTime(dt)) => Value::DateTime(dt),
        (ScalarTy::DateTime, Value::Date(d)) => match d.and_hms_opt(0, 0, 0) {
            Some(dt) => Value::DateTime(dt),
            None => Value::Null,
        },
        // Zero timestamps mean "no value"
        (ScalarTy::DateTime, Value::I64(0)) => Value::Null,
        (ScalarTy::DateTime, Value::I64(ts)) => match chrono::DateTime::from_timestamp(ts, 0) {
            Some(dt) => Value::DateTime(dt.naive_utc()),
            None => return Err(Error::type_conversion(Value::I64(ts), "datetime")),
        },
        (ScalarTy::DateTime, Value::String(s)) => {
            if is_zero_date(&s) {
                Value::Null
            } else {
                match NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
                    .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S"))
                {
                    Ok(dt) => Value::DateTime(dt),
                    Err(_) => return Err(Error::type_conversion(Value::String(s), "datetime")),
                }
            }
        }

        (ty, other) => return Err(Error::type_conversion(other, scalar_ty_name(ty))),
    })
}

fn is_zero_date(s: &str) -> bool {
    s.starts_with("0000-00-00")
}

fn scalar_ty_name(ty: ScalarTy) -> &'static str {
    match ty {
        ScalarTy::Bool => "bool",
        ScalarTy::I64 => "i64",
        ScalarTy::F64 => "f64",
        ScalarTy::Text => "text",
        ScalarTy::Date => "date",
        ScalarTy::Time => "time",
        ScalarTy::DateTime => "datetime",
    }
}
