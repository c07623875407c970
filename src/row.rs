//! The row data model: an insertion-ordered, nested, nullable record.
//!
//! A [`Row`] maps column names to [`RowValue`]s. The value domain is closed:
//!
//! | Variant | JSON form |
//! |---------|-----------|
//! | [`RowValue::Null`] | `null` |
//! | [`RowValue::Bool`] | `true` / `false` |
//! | [`RowValue::Number`] | number |
//! | [`RowValue::String`] | string |
//! | [`RowValue::Row`] | object |
//! | [`RowValue::Array`] | array |
//! | [`RowValue::Timestamp`], [`RowValue::Date`], [`RowValue::DateTime`], [`RowValue::Time`] | ISO-8601 string |
//!
//! Temporal values only exist on the way in: JSON has no date type, so they
//! come back from a decode as [`RowValue::String`] holding the same text.
//!
//! Rows remember insertion order, and that order is the key order of the
//! encoded JSON. Equality (`==`) compares rows as maps: same keys mapped to
//! equal values, regardless of order. Compare [`Row::keys`] when order matters.
//!
//! ```
//! use rowcoder::{Row, RowValue};
//!
//! let row = Row::new()
//!     .with("id", 7)
//!     .with("name", "ada")
//!     .with("manager", RowValue::Null)
//!     .with("tags", vec![RowValue::from("x"), RowValue::from("y")]);
//!
//! assert_eq!(row.len(), 4);
//! assert!(row.get("manager").is_some_and(RowValue::is_null));
//! assert_eq!(row.keys().collect::<Vec<_>>(), ["id", "name", "manager", "tags"]);
//! ```

pub mod json;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;

/// A JSON number as carried by a row.
///
/// Integers that fit in `i64` are always [`Number::Int`]; [`Number::UInt`] is
/// reserved for values above `i64::MAX`. Constructors normalize, so the same
/// integer never has two representations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// `Some` if the number is an integer representable as `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => i64::try_from(v).ok(),
            Self::Float(_) => None,
        }
    }

    /// `Some` if the number is a non-negative integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::Int(v) => u64::try_from(v).ok(),
            Self::UInt(v) => Some(v),
            Self::Float(_) => None,
        }
    }

    /// The number as `f64` (lossy for large integers).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// False for `NaN` and the infinities, which have no JSON form.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Int(_) | Self::UInt(_) => true,
            Self::Float(v) => v.is_finite(),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::UInt(v), Self::Int)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// One value in a [`Row`].
#[derive(Clone, Debug, PartialEq)]
pub enum RowValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Row(Row),
    Array(Vec<RowValue>),
    /// A UTC instant.
    Timestamp(DateTime<Utc>),
    /// A calendar date with no time of day.
    Date(NaiveDate),
    /// A civil date-time with no zone.
    DateTime(NaiveDateTime),
    /// A civil time of day.
    Time(NaiveTime),
}

impl RowValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Self::Row(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[RowValue]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Row(_) => "row",
            Self::Array(_) => "array",
            Self::Timestamp(_) => "timestamp",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Time(_) => "time",
        }
    }
}

macro_rules! row_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for RowValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

row_value_from! {
    bool => Bool,
    i32 => Number,
    i64 => Number,
    u32 => Number,
    u64 => Number,
    f64 => Number,
    Number => Number,
    String => String,
    &str => String,
    Row => Row,
    Vec<RowValue> => Array,
    DateTime<Utc> => Timestamp,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    NaiveTime => Time,
}

impl<T: Into<RowValue>> From<Option<T>> for RowValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// An ordered mapping from column names to values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: IndexMap<String, RowValue>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RowValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field. An existing key keeps its position and gets the new
    /// value; the old value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RowValue>) -> Option<RowValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a field, shifting later fields up so order is preserved.
    pub fn remove(&mut self, key: &str) -> Option<RowValue> {
        self.fields.shift_remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RowValue> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<RowValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<RowValue>> Extend<(K, V)> for Row {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.fields
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Row {
    type Item = (String, RowValue);
    type IntoIter = indexmap::map::IntoIter<String, RowValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_existing_key_keeps_position() {
        let mut row = Row::new().with("a", 1).with("b", 2).with("c", 3);
        let old = row.insert("a", "replaced");
        assert_eq!(old, Some(RowValue::from(1)));
        assert_eq!(row.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(row.get("a").and_then(RowValue::as_str), Some("replaced"));
    }

    #[test]
    fn remove_preserves_order_of_remaining_fields() {
        let mut row = Row::new().with("a", 1).with("b", 2).with("c", 3);
        assert!(row.remove("b").is_some());
        assert_eq!(row.keys().collect::<Vec<_>>(), ["a", "c"]);
        assert!(row.remove("missing").is_none());
    }

    #[test]
    fn equality_ignores_key_order() {
        let a = Row::new().with("x", 1).with("y", 2);
        let b = Row::new().with("y", 2).with("x", 1);
        assert_eq!(a, b);
        assert_ne!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
    }

    #[test]
    fn large_unsigned_numbers_keep_their_value() {
        assert_eq!(Number::from(5u64), Number::Int(5));
        assert_eq!(Number::from(u64::MAX), Number::UInt(u64::MAX));
        assert_eq!(Number::from(u64::MAX).as_i64(), None);
        assert_eq!(Number::Int(-1).as_u64(), None);
    }

    #[test]
    fn option_converts_to_null() {
        let none: Option<&str> = None;
        assert!(RowValue::from(none).is_null());
        assert_eq!(RowValue::from(Some("v")).as_str(), Some("v"));
    }

    #[test]
    fn from_iterator_builds_ordered_row() {
        let row: Row = vec![("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(row.keys().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(row.get("a").and_then(RowValue::as_i64), Some(2));
    }

    #[test]
    fn non_finite_floats_are_flagged() {
        assert!(!Number::Float(f64::NAN).is_finite());
        assert!(!Number::Float(f64::INFINITY).is_finite());
        assert!(Number::Float(1.5).is_finite());
        assert!(Number::UInt(u64::MAX).is_finite());
    }
}
