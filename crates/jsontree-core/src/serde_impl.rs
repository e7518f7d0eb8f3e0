//! serde integration and conversion to and from `serde_json::Value`.
//!
//! Serialization follows the text writer: `UNDEFINED` and non-finite
//! numbers are rejected. Decimals that hold an integer in `i64` range are
//! emitted as integers, other decimals as doubles.

use crate::container::{Array, Object};
use crate::decimal::Decimal;
use crate::error::JsonError;
use crate::number::Number;
use crate::value::Value;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

fn decimal_as_i64(d: &Decimal) -> Option<i64> {
    if d.is_integral() {
        i64::try_from(d.round_to_integer()).ok()
    } else {
        None
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Undefined => Err(ser::Error::custom("undefined cannot be serialized")),
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => {
                if !n.is_finite() {
                    return Err(ser::Error::custom(format!(
                        "non-finite number {n} cannot be serialized"
                    )));
                }
                match n {
                    Number::I64(v) => serializer.serialize_i64(*v),
                    Number::U64(v) => serializer.serialize_u64(*v),
                    Number::F32(v) => serializer.serialize_f32(*v),
                    Number::F64(v) => serializer.serialize_f64(*v),
                    Number::Decimal(d) => match decimal_as_i64(d) {
                        Some(v) => serializer.serialize_i64(v),
                        None => serializer.serialize_f64(d.to_f64()),
                    },
                }
            }
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::Number(Number::I64(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Number(Number::F64(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(element) = seq.next_element::<Value>()? {
                    items.push(element);
                }
                Ok(Value::Array(Array::from_items(items)))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut object = Object::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    object.add(key, value).map_err(de::Error::custom)?;
                }
                Ok(Value::Object(object))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// ============================================================================
// serde_json::Value conversions
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Value::Number(Number::I64(v))
                } else if let Some(v) = n.as_u64() {
                    Value::Number(Number::U64(v))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(Array::from_items(
                items.into_iter().map(Value::from).collect(),
            )),
            serde_json::Value::Object(map) => Value::Object(Object::from_entries(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}

fn json_number(n: &Number) -> Result<serde_json::Number, JsonError> {
    let double = |v: f64| {
        serde_json::Number::from_f64(v).ok_or_else(|| {
            JsonError::InvalidState(format!("non-finite number {n} has no JSON form"))
        })
    };
    match n {
        Number::I64(v) => Ok((*v).into()),
        Number::U64(v) => Ok((*v).into()),
        Number::F32(_) => double(n.as_f64()),
        Number::F64(v) => double(*v),
        Number::Decimal(d) => match decimal_as_i64(d) {
            Some(v) => Ok(v.into()),
            None => double(d.to_f64()),
        },
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self, JsonError> {
        Ok(match value {
            Value::Undefined => {
                return Err(JsonError::InvalidState(
                    "undefined has no JSON form".to_string(),
                ))
            }
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => serde_json::Value::Number(json_number(n)?),
            Value::Array(arr) => serde_json::Value::Array(
                arr.iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(obj) => {
                let mut map = serde_json::Map::with_capacity(obj.len());
                for (k, v) in obj {
                    map.insert(k.to_string(), serde_json::Value::try_from(v)?);
                }
                serde_json::Value::Object(map)
            }
        })
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = JsonError;

    fn try_from(value: Value) -> Result<Self, JsonError> {
        serde_json::Value::try_from(&value)
    }
}
