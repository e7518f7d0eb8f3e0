//! The JSON value tree node and its kinds.

use crate::container::{Array, Object};
use crate::datetime;
use crate::decimal::Decimal;
use crate::error::Result;
use crate::guid::Guid;
use crate::number::Number;
use crate::uri::Uri;
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;
use std::ops::Index;

/// The tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    Undefined,
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Object => "Object",
            JsonKind::Array => "Array",
            JsonKind::String => "String",
            JsonKind::Number => "Number",
            JsonKind::Boolean => "Boolean",
            JsonKind::Null => "Null",
            JsonKind::Undefined => "Undefined",
        };
        f.write_str(name)
    }
}

/// A JSON document node.
///
/// `Null` is the storable JSON literal `null`. `Undefined` is the result of
/// a navigation that missed: it is never stored in a container, never
/// produced by parsing, and cannot be serialized. Use the shared
/// [`UNDEFINED`] instance rather than constructing it.
///
/// Date/time, GUID, URI and `char` values are `String` values holding a
/// canonical text; read them back with [`Value::read_as`].
#[derive(Debug, Clone, Default)]
pub enum Value {
    Object(Object),
    Array(Array),
    String(String),
    Number(Number),
    Boolean(bool),
    #[default]
    Null,
    Undefined,
}

/// The single undefined value returned by navigation misses.
pub static UNDEFINED: Value = Value::Undefined;

impl Value {
    /// Build an object value from ordered pairs; duplicate keys fail.
    pub fn object<I, K, V>(pairs: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Object::from_pairs(pairs).map(Value::Object)
    }

    /// Build an array value from ordered elements.
    pub fn array<I, V>(values: I) -> Result<Value>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Array::from_values(values).map(Value::Array)
    }

    pub fn kind(&self) -> JsonKind {
        match self {
            Value::Object(_) => JsonKind::Object,
            Value::Array(_) => JsonKind::Array,
            Value::String(_) => JsonKind::String,
            Value::Number(_) => JsonKind::Number,
            Value::Boolean(_) => JsonKind::Boolean,
            Value::Null => JsonKind::Null,
            Value::Undefined => JsonKind::Undefined,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Number of children; zero for scalars, `Null` and `Undefined`.
    pub fn count(&self) -> usize {
        match self {
            Value::Object(o) => o.len(),
            Value::Array(a) => a.len(),
            _ => 0,
        }
    }

    /// Object keys in order; empty for every other kind.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.as_object().into_iter().flat_map(|o| o.keys())
    }

    /// Object values or array elements in order; empty for other kinds.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        let members = self.as_object().into_iter().flat_map(|o| o.values());
        let elements = self.as_array().into_iter().flat_map(|a| a.iter());
        members.chain(elements)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.as_object().is_some_and(|o| o.contains_key(key))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            _ => false,
        }
    }
}

/// Lenient lookup: anything that is not a present key yields [`UNDEFINED`].
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.as_object()
            .and_then(|o| o.get(key))
            .unwrap_or(&UNDEFINED)
    }
}

/// Lenient lookup: anything that is not an in-range element yields
/// [`UNDEFINED`].
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.as_array()
            .and_then(|a| a.get(index))
            .unwrap_or(&UNDEFINED)
    }
}

// ============================================================================
// Construction from host values
// ============================================================================

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64);
value_from_number!(f32, f64, Decimal, Number);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Number(Number::I64(value as i64))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(Number::U64(value as u64))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Uri> for Value {
    fn from(value: Uri) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Guid> for Value {
    fn from(value: Guid) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::String(datetime::format_utc(&value))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::String(datetime::format_offset(&value))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

/// The host "no value" is `Null`, never `Undefined`.
impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
