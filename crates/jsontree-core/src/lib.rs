//! # jsontree-core
//!
//! A mutable, order-preserving **JSON value tree** for Rust.
//!
//! Documents are trees of [`Value`] nodes. Objects keep their insertion
//! order through every mutation and serialization, so text that is read and
//! written back comes out in the same order. Containers raise before/after
//! change events to subscribed listeners, scalars convert to host types
//! through a checked coercion table, and navigation through missing data
//! yields the shared [`UNDEFINED`] sentinel instead of failing.
//!
//! ## Quick start
//!
//! ```rust
//! use jsontree_core::{parse, path, WriteOptions};
//!
//! let mut doc = parse(r#"{"name":"Alice","scores":[95,87]}"#).unwrap();
//!
//! // Typed reads
//! let name: String = doc["name"].read_as().unwrap();
//! assert_eq!(name, "Alice");
//!
//! // Missing data is undefined, not an error
//! assert!(doc.value_or_default(path!["address", "city"]).unwrap().is_undefined());
//!
//! // Mutation keeps order
//! doc.as_object_mut().unwrap().set("active", true).unwrap();
//! doc.as_object_mut().unwrap().array_mut("scores").unwrap().add(92).unwrap();
//! assert_eq!(
//!     doc.to_text(&WriteOptions::compact()).unwrap(),
//!     r#"{"name":"Alice","scores":[95,87,92],"active":true}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the node type, its kinds and `UNDEFINED`
//! - [`container`]: `Object` and `Array` bodies with change notification
//! - [`notify`]: listener and change event types
//! - [`coerce`]: reading values as host types
//! - [`path`]: checked indexing and `value_or_default`
//! - [`encoder`] / [`decoder`]: JSON text writer and reader
//! - [`number`], [`decimal`], [`guid`], [`uri`]: scalar payload types
//! - [`error`]: the error taxonomy

pub mod coerce;
pub mod container;
mod datetime;
pub mod decimal;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod guid;
pub mod notify;
pub mod number;
pub mod path;
mod serde_impl;
pub mod uri;
pub mod value;

pub use coerce::FromValue;
pub use container::{Array, Object, ObjectIter};
pub use decimal::Decimal;
pub use decoder::{load, parse, parse_with, try_parse, ReadOptions};
pub use encoder::WriteOptions;
pub use error::{JsonError, Result};
pub use guid::Guid;
pub use notify::{ChangeEvent, ChangeKey, ChangeKind, ChangePhase, Listener, ListenerId};
pub use number::{Number, NumericType};
pub use path::Segment;
pub use uri::Uri;
pub use value::{JsonKind, Value, UNDEFINED};
