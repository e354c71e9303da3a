//! Type-tagged JSON: round-trip typed object graphs through plain JSON text.
//!
//! A tagged document is ordinary JSON with one convention on top: a typed object serializes as a
//! JSON object carrying all its fields in declaration order plus a final reserved member,
//! `"__meta": "<type identifier>"`. Anything that does not know the convention still reads the
//! text as plain JSON; anything that does can rebuild the original typed objects, however deeply
//! they nest inside arrays and maps.
//!
//! The crate revolves around three pieces:
//!
//! - [`Value`], the document tree (JSON primitives, sequences, maps, and typed objects).
//! - [`MapperRegistry`], the store of per-type encode/decode functions, consulted during both
//!   directions. Registries are explicit values, not global state, and registration is
//!   first-wins.
//! - [`to_json`] / [`from_json`], the two engines.
//!
//! # Quick start
//!
//! Derive the mapping with [`impl_mapped!`] and the round trip is automatic; the first encode of
//! a type registers its mapper as a side effect.
//!
//! ```rust
//! use tagson::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Job {
//!     cmd: String,
//!     retries: u32,
//! }
//! impl_mapped!(Job, "sched.Job", cmd, retries);
//!
//! let mut registry = MapperRegistry::new();
//! let job = Job { cmd: "build".into(), retries: 3 };
//!
//! let json = to_json(&Value::new_obj(job.clone()), &mut registry).unwrap();
//! assert_eq!(json, r#"{"cmd": "build", "retries": 3, "__meta": "sched.Job"}"#);
//!
//! let value = from_json(&json, &registry).unwrap();
//! assert_eq!(value.obj::<Job>(), Some(&job));
//! ```
//!
//! # Custom mappers
//!
//! When the generated field list is not the wire shape you want, declare the two directions by
//! hand with [`CustomMapper`]. Declarations are subject to the same first-wins rule, so declare
//! before the first encode of the type.
//!
//! # Unknown tags
//!
//! Decoding never fails on a tag it does not recognize: the object stays a plain [`Value::Map`],
//! `"__meta"` member included, so external data round-trips untouched.
//!
//! ```rust
//! use tagson::*;
//!
//! let registry = MapperRegistry::new();
//! let value = from_json(r#"{"x": 1, "__meta": "ext.Unknown"}"#, &registry).unwrap();
//! assert!(value.fields().unwrap().contains_key("__meta"));
//! ```
//!
//! # Feature flags
//!
//! - _encode_ (default): the [`encode`] module, a serde bridge for converting plain (untagged)
//!   data structures to and from [`Value`].

mod convert;
pub mod ds;
#[cfg(feature = "encode")]
pub mod encode;
pub mod fmt;
mod mapper;
pub mod parse;

pub use crate::convert::{FromValue, IntoValue};
pub use crate::ds::{Fields, IntoIntError, Number, Value};
pub use crate::fmt::{to_json, EncodeError, META_FIELD};
pub use crate::mapper::{
    ConstructionError, CustomMapper, DecodeFn, EncodeFn, FromFields, Mapped, MapperContractError,
    MapperRegistry, SharedRegistry,
};
pub use crate::parse::{from_json, DecodeError};
