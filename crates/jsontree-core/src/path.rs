//! Checked indexing and undefined-tolerant path navigation.
//!
//! A [`Segment`] is one dynamically-typed index, as a host binding layer
//! would hand it over. Only string keys and non-negative integral numbers
//! are well-formed; anything else fails with `InvalidArgument` everywhere,
//! including inside [`Value::value_or_default`]. Navigation tolerates
//! missing data, never malformed requests.

use crate::error::{JsonError, Result};
use crate::value::{Value, UNDEFINED};

/// One index into a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Key(String),
    Position(i64),
    /// A numeric index that is not known to be integral.
    Number(f64),
    Null,
    /// Several indexes supplied at once (`value[a, b]`).
    Compound(Vec<Segment>),
    /// An index of a type that is neither text nor number.
    Unsupported(&'static str),
}

/// A validated segment.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step<'a> {
    Key(&'a str),
    Position(usize),
}

impl Step<'_> {
    fn type_name(&self) -> &'static str {
        match self {
            Step::Key(_) => "a string key",
            Step::Position(_) => "an integer index",
        }
    }
}

impl Segment {
    pub(crate) fn resolve(&self) -> Result<Step<'_>> {
        let invalid = |why: String| Err(JsonError::InvalidArgument(why));
        match self {
            Segment::Key(key) => Ok(Step::Key(key)),
            Segment::Position(index) => match usize::try_from(*index) {
                Ok(index) => Ok(Step::Position(index)),
                Err(_) => invalid(format!("index {index} is negative")),
            },
            Segment::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && *n >= 0.0 && *n <= usize::MAX as f64 {
                    Ok(Step::Position(*n as usize))
                } else {
                    invalid(format!("index {n} is not a non-negative integer"))
                }
            }
            Segment::Null => invalid("index is null".to_string()),
            Segment::Compound(parts) => invalid(format!(
                "{} indexes supplied where one is expected",
                parts.len()
            )),
            Segment::Unsupported(type_name) => {
                invalid(format!("an index of type {type_name} is not supported"))
            }
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<&String> for Segment {
    fn from(key: &String) -> Self {
        Segment::Key(key.clone())
    }
}

macro_rules! segment_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Segment {
                fn from(index: $t) -> Self {
                    Segment::Position(i64::try_from(index).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

segment_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Segment {
    fn from(index: f64) -> Self {
        Segment::Number(index)
    }
}

impl From<f32> for Segment {
    fn from(index: f32) -> Self {
        Segment::Number(index as f64)
    }
}

impl From<()> for Segment {
    fn from(_: ()) -> Self {
        Segment::Null
    }
}

impl From<bool> for Segment {
    fn from(_: bool) -> Self {
        Segment::Unsupported("bool")
    }
}

impl From<Vec<Segment>> for Segment {
    fn from(parts: Vec<Segment>) -> Self {
        Segment::Compound(parts)
    }
}

/// A value used as an index, the way a dynamic host passes one.
impl From<&Value> for Segment {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Segment::Key(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Segment::Position(i),
                None => Segment::Number(n.as_f64()),
            },
            Value::Null | Value::Undefined => Segment::Null,
            Value::Boolean(_) => Segment::Unsupported("Boolean"),
            Value::Object(_) => Segment::Unsupported("Object"),
            Value::Array(_) => Segment::Unsupported("Array"),
        }
    }
}

/// Build a heterogeneous path: `path!["items", 0, "name"]`.
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        [$($crate::Segment::from($segment)),*]
    };
}

impl Value {
    fn step(&self, step: Step<'_>) -> Result<&Value> {
        match (self, step) {
            (Value::Undefined, _) => Ok(&UNDEFINED),
            (Value::Object(o), Step::Key(key)) => Ok(o.get(key).unwrap_or(&UNDEFINED)),
            (Value::Array(a), Step::Position(index)) => a.get(index).ok_or_else(|| {
                JsonError::InvalidArgument(format!(
                    "index {index} is out of range for an array of {} elements",
                    a.len()
                ))
            }),
            (other, step) => Err(JsonError::UnsupportedIndexer {
                index_type: step.type_name(),
                kind: other.kind(),
            }),
        }
    }

    /// Checked indexing.
    ///
    /// A missing object key yields [`UNDEFINED`]; indexing `UNDEFINED` by
    /// any well-formed segment yields `UNDEFINED`. Wrong index types for the
    /// kind fail with `UnsupportedIndexer`; malformed segments and array
    /// positions past the end fail with `InvalidArgument`.
    pub fn get(&self, segment: impl Into<Segment>) -> Result<&Value> {
        let segment = segment.into();
        self.step(segment.resolve()?)
    }

    /// The child at `segment`, or `None` for misses and errors alike.
    pub fn try_get(&self, segment: impl Into<Segment>) -> Option<&Value> {
        self.get(segment).ok().filter(|v| !v.is_undefined())
    }

    /// Store `value` at `segment` in this object or array, raising that
    /// container's change events.
    pub fn set(&mut self, segment: impl Into<Segment>, value: impl Into<Value>) -> Result<()> {
        let segment = segment.into();
        match (self, segment.resolve()?) {
            (Value::Object(o), Step::Key(key)) => o.set(key, value),
            (Value::Array(a), Step::Position(index)) => a.set(index, value),
            (Value::Undefined, _) => Err(JsonError::InvalidState(
                "cannot store a value into undefined".to_string(),
            )),
            (other, step) => Err(JsonError::UnsupportedIndexer {
                index_type: step.type_name(),
                kind: other.kind(),
            }),
        }
    }

    /// Walk `path` and return what is there, or [`UNDEFINED`] as soon as a
    /// step misses (absent key, position past the end, scalar indexed).
    /// An empty path returns `self`. Every segment is validated, so a
    /// malformed one fails even after a miss.
    ///
    /// ```
    /// use jsontree_core::{parse, path, JsonKind};
    ///
    /// let doc = parse(r#"{"items":[{"name":"a"}]}"#).unwrap();
    /// let name = doc.value_or_default(path!["items", 0, "name"]).unwrap();
    /// assert_eq!(name.read_as::<String>().unwrap(), "a");
    ///
    /// let missing = doc.value_or_default(path!["items", 3, "name"]).unwrap();
    /// assert_eq!(missing.kind(), JsonKind::Undefined);
    /// ```
    pub fn value_or_default<I>(&self, path: I) -> Result<&Value>
    where
        I: IntoIterator,
        I::Item: Into<Segment>,
    {
        let mut current = self;
        for segment in path {
            let segment = segment.into();
            let step = segment.resolve()?;
            current = current.step(step).unwrap_or(&UNDEFINED);
        }
        Ok(current)
    }
}
