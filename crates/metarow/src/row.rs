//! Row instances bound to a schema's fixed field set.

use crate::error::{RowError, RowResult};
use crate::schema::SchemaRef;
use crate::value::{Slot, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;

/// A record whose fields are exactly the fields of its schema.
///
/// Every field holds a [`Slot`]: fields that were never supplied are
/// [`Slot::Missing`] and are left out of INSERT statements.
///
/// # Example
///
/// ```rust
/// use metarow::{Field, Row, RowSchema, Slot, Value};
///
/// let schema = RowSchema::builder("ABRow")
///     .fields([Field::int("a"), Field::int("b")])
///     .build()?;
///
/// let row = Row::construct(&schema, vec![Value::Int(1)], vec![])?;
/// assert_eq!(row.get("a")?, &Slot::Set(Value::Int(1)));
/// assert!(row.get("b")?.is_missing());
/// # Ok::<(), metarow::RowError>(())
/// ```
#[derive(Clone)]
pub struct Row {
    schema: SchemaRef,
    slots: Vec<Slot>,
}

impl Row {
    /// Bind positional values (declaration order), then named values.
    ///
    /// Errors:
    /// - [`RowError::ArgCount`] when there are more positional values than fields
    /// - [`RowError::UndeclaredField`] for a name the schema does not declare
    /// - [`RowError::DuplicateArg`] when a name was already bound
    pub fn construct(
        schema: &SchemaRef,
        positional: Vec<Value>,
        named: Vec<(String, Value)>,
    ) -> RowResult<Self> {
        let width = schema.width();
        if positional.len() > width {
            return Err(RowError::ArgCount {
                schema: schema.name().to_string(),
                given: positional.len(),
                declared: width,
            });
        }

        let mut slots = vec![Slot::Missing; width];
        let mut bound = vec![false; width];
        for (i, value) in positional.into_iter().enumerate() {
            slots[i] = Slot::Set(value);
            bound[i] = true;
        }

        for (name, value) in named {
            let Some(pos) = schema.position(&name) else {
                return Err(RowError::UndeclaredField {
                    schema: schema.name().to_string(),
                    field: name,
                });
            };
            if bound[pos] {
                return Err(RowError::DuplicateArg {
                    field: name,
                    position: pos,
                });
            }
            slots[pos] = Slot::Set(value);
            bound[pos] = true;
        }

        Ok(Self {
            schema: Arc::clone(schema),
            slots,
        })
    }

    /// Bind values positionally, in field declaration order.
    pub fn new<I, V>(schema: &SchemaRef, values: I) -> RowResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::construct(schema, values.into_iter().map(Into::into).collect(), Vec::new())
    }

    /// Bind values by field name.
    pub fn from_named<I, K, V>(schema: &SchemaRef, pairs: I) -> RowResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let named = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::construct(schema, Vec::new(), named)
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Field slots in declaration order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }

    /// Slot of `field`; unknown names are [`RowError::UnknownField`].
    pub fn get(&self, field: &str) -> RowResult<&Slot> {
        let pos = self.schema.require_field(field)?;
        Ok(&self.slots[pos])
    }

    /// Bound value of `field`, or `None` when missing or undeclared.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.schema
            .position(field)
            .and_then(|pos| self.slots[pos].value())
    }

    /// Assign a declared field; any other name is [`RowError::UndeclaredField`].
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> RowResult<&mut Self> {
        let Some(pos) = self.schema.position(field) else {
            return Err(RowError::UndeclaredField {
                schema: self.schema.name().to_string(),
                field: field.to_string(),
            });
        };
        self.slots[pos] = Slot::Set(value.into());
        Ok(self)
    }

    /// Primary-key slots in primary-key declaration order.
    pub fn primary_key(&self) -> Vec<Slot> {
        self.schema
            .pkey()
            .iter()
            .filter_map(|key| self.schema.position(key))
            .map(|pos| self.slots[pos].clone())
            .collect()
    }

    /// `(field, value)` pairs of every non-missing field, in declaration order.
    pub fn bound(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .field_names()
            .zip(&self.slots)
            .filter_map(|(name, slot)| slot.value().map(|v| (name, v)))
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.schema.name());
        for (name, slot) in self.schema.field_names().zip(&self.slots) {
            s.field(name, slot);
        }
        s.finish()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.schema.name())?;
        for (name, slot) in self.schema.field_names().zip(&self.slots) {
            write!(f, " {name}={slot}")?;
        }
        f.write_str(">")
    }
}

/// Serializes as a map of the bound fields; missing fields are omitted.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.bound() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, RowSchema};

    fn ab() -> SchemaRef {
        RowSchema::builder("ABRow")
            .fields([Field::int("a"), Field::int("b")])
            .pkey(["a"])
            .build()
            .unwrap()
    }

    #[test]
    fn field_attrs() {
        let r = Row::new(&ab(), [1, 2]).unwrap();
        assert_eq!(r.value("a"), Some(&Value::Int(1)));
        assert_eq!(r.value("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn constructor_styles_agree() {
        let schema = ab();
        let rows = [
            Row::new(&schema, [1, 2]).unwrap(),
            Row::construct(&schema, vec![Value::Int(1)], vec![("b".into(), Value::Int(2))])
                .unwrap(),
            Row::from_named(&schema, [("a", 1), ("b", 2)]).unwrap(),
        ];
        assert!(rows.iter().all(|r| r == &rows[0]));
    }

    #[test]
    fn unsupplied_fields_are_missing() {
        let r = Row::new(&ab(), [1]).unwrap();
        assert_eq!(r.get("a").unwrap(), &Slot::Set(Value::Int(1)));
        assert_eq!(r.get("b").unwrap(), &Slot::Missing);
        assert_eq!(r.value("b"), None);
    }

    #[test]
    fn explicit_null_is_not_missing() {
        let r = Row::from_named(&ab(), [("b", Value::Null)]).unwrap();
        assert_eq!(r.get("b").unwrap(), &Slot::Set(Value::Null));
        assert!(r.get("a").unwrap().is_missing());
    }

    #[test]
    fn too_many_positional_values() {
        let err = Row::new(&ab(), [1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            RowError::ArgCount {
                given: 3,
                declared: 2,
                ..
            }
        ));
    }

    #[test]
    fn named_value_colliding_with_position() {
        let err = Row::construct(&ab(), vec![Value::Int(1)], vec![("a".into(), Value::Int(9))])
            .unwrap_err();
        assert!(matches!(err, RowError::DuplicateArg { field, position: 0 } if field == "a"));
    }

    #[test]
    fn undeclared_field_in_constructor() {
        let err = Row::from_named(&ab(), [("a", 1), ("c", 3)]).unwrap_err();
        assert!(matches!(err, RowError::UndeclaredField { field, .. } if field == "c"));
    }

    #[test]
    fn undeclared_field_assignment() {
        let mut r = Row::new(&ab(), [1, 2]).unwrap();
        assert!(r.set("c", 10).is_err());
        r.set("b", 10).unwrap();
        assert_eq!(r.value("b"), Some(&Value::Int(10)));
    }

    #[test]
    fn equality_is_fieldwise() {
        let schema = ab();
        assert_eq!(
            Row::new(&schema, ["a", "b"]).unwrap(),
            Row::new(&schema, ["a", "b"]).unwrap()
        );
        assert_ne!(
            Row::new(&schema, ["a", "b"]).unwrap(),
            Row::new(&schema, ["a", "b2"]).unwrap()
        );
    }

    #[test]
    fn primary_key_follows_pkey_order() {
        let schema = RowSchema::builder("Edge")
            .fields([Field::int("src"), Field::int("dst"), Field::text("label")])
            .pkey(["dst", "src"])
            .build()
            .unwrap();
        let r = Row::new(&schema, [Value::Int(1), Value::Int(2), Value::from("x")]).unwrap();
        assert_eq!(r.primary_key(), [Slot::set(2), Slot::set(1)]);
    }

    #[test]
    fn display_and_serialize() {
        let r = Row::new(&ab(), [1]).unwrap();
        assert_eq!(r.to_string(), "<ABRow a=1 b=Missing>");
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"a":1}"#);
    }
}
