//! Typed object mapping.
//!
//! A _mapped_ type is one that can cross the JSON boundary as a tagged object: it names itself
//! with a type identifier, flattens into a [`Fields`] list for encoding, and is rebuilt from one
//! on decoding. The [`Mapped`] trait is the object-safe surface [`Value::Obj`] stores; the
//! [`impl_mapped!`] macro generates it (plus the conversion traits) from a field list, standing in
//! for the runtime reflection a dynamic language would use.
//!
//! Encoders and decoders live in a [`MapperRegistry`], keyed by type identifier. Registration is
//! first-wins: a mapper already present for an identifier is never replaced. [`CustomMapper`]
//! declares hand-written encode and decode closures for a type, overriding the generated default
//! as long as it is declared before the first encode of that type.
//!
//! [`Value::Obj`]: crate::Value::Obj

use crate::ds::{Fields, Value};
use crate::fmt::EncodeError;
use std::any::Any;
use std::fmt;

mod registry;

pub use self::registry::{DecodeFn, EncodeFn, MapperRegistry, SharedRegistry};

/// A type that serializes as a tagged JSON object.
///
/// Implemented via [`impl_mapped!`] for the common case. The trait is object safe; a
/// [`Value::Obj`](crate::Value::Obj) stores a `Box<dyn Mapped>`.
pub trait Mapped: Send + Sync + 'static {
    /// The type identifier written as the tag. Stable across program runs; usually a
    /// dotted path such as `"geom.Point"`.
    fn ident(&self) -> &'static str;

    /// The object's fields in declaration order.
    fn to_fields(&self) -> Fields;

    /// Register this type's generated mapper under [`ident`](Mapped::ident), if no mapper is
    /// present for it yet.
    fn register_default(&self, registry: &mut MapperRegistry);

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn clone_mapped(&self) -> Box<dyn Mapped>;

    fn eq_mapped(&self, other: &dyn Mapped) -> bool;
}

/// Rebuild a mapped type from its decoded field list.
///
/// The field list handed in has already had the type tag removed.
pub trait FromFields: Sized {
    fn from_fields(fields: Fields) -> Result<Self, ConstructionError>;
}

/// Failure to rebuild a typed object from decoded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// A required field was absent.
    MissingField(String),
    /// A field held a value of the wrong kind.
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A custom deserializer failed with its own message.
    Message(String),
}

impl ConstructionError {
    /// A `Mismatch` against the kind of `found`.
    pub fn mismatch(expected: &'static str, found: &Value) -> Self {
        ConstructionError::Mismatch {
            expected,
            found: found.kind(),
        }
    }
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::MissingField(field) => write!(f, "missing field '{}'", field),
            ConstructionError::Mismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            ConstructionError::Message(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConstructionError {}

/// An incomplete [`CustomMapper`] declaration.
///
/// A mapper must carry both directions; declaring one with either closure missing fails rather
/// than registering a half-working entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapperContractError {
    /// `declare` was called without a serialize closure.
    MissingSerialize(String),
    /// `declare` was called without a deserialize closure.
    MissingDeserialize(String),
}

impl fmt::Display for MapperContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapperContractError::MissingSerialize(ident) => {
                write!(f, "mapper for '{}' declared without a serialize function", ident)
            }
            MapperContractError::MissingDeserialize(ident) => {
                write!(f, "mapper for '{}' declared without a deserialize function", ident)
            }
        }
    }
}

impl std::error::Error for MapperContractError {}

/// Implement [`Mapped`] and the conversion traits for a struct from its field list.
///
/// The fields are encoded in the order given, which becomes the wire order. The type must be
/// `Clone + PartialEq + Send + Sync + 'static` and each listed field's type must implement
/// [`IntoValue`](crate::IntoValue) and [`FromValue`](crate::FromValue).
///
/// ```rust
/// # use tagson::*;
/// #[derive(Debug, Clone, PartialEq)]
/// struct Point { x: i64, y: i64 }
/// impl_mapped!(Point, "geom.Point", x, y);
///
/// let mut registry = MapperRegistry::new();
/// let json = to_json(&Value::new_obj(Point { x: 1, y: 2 }), &mut registry).unwrap();
/// assert_eq!(json, r#"{"x": 1, "y": 2, "__meta": "geom.Point"}"#);
/// ```
#[macro_export]
macro_rules! impl_mapped {
    ($t:ty, $ident:expr, $($field:ident),+ $(,)?) => {
        impl $crate::Mapped for $t {
            fn ident(&self) -> &'static str {
                $ident
            }

            fn to_fields(&self) -> $crate::Fields {
                let mut fields = $crate::Fields::new();
                $(
                    fields.insert(
                        stringify!($field),
                        $crate::IntoValue::into_value(self.$field.clone()),
                    );
                )+
                fields
            }

            fn register_default(&self, registry: &mut $crate::MapperRegistry) {
                registry.register(
                    $ident,
                    Box::new(|obj: &dyn $crate::Mapped| Ok(obj.to_fields())),
                    Box::new(|fields: $crate::Fields| {
                        <$t as $crate::FromFields>::from_fields(fields)
                            .map(|t| Box::new(t) as Box<dyn $crate::Mapped>)
                    }),
                );
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn ::std::any::Any> {
                self
            }

            fn clone_mapped(&self) -> Box<dyn $crate::Mapped> {
                Box::new(self.clone())
            }

            fn eq_mapped(&self, other: &dyn $crate::Mapped) -> bool {
                other
                    .as_any()
                    .downcast_ref::<$t>()
                    .map(|o| o == self)
                    .unwrap_or(false)
            }
        }

        impl $crate::FromFields for $t {
            fn from_fields(mut fields: $crate::Fields) -> Result<Self, $crate::ConstructionError> {
                Ok(Self {
                    $(
                        $field: $crate::FromValue::from_value(
                            fields.remove(stringify!($field)).ok_or_else(|| {
                                $crate::ConstructionError::MissingField(
                                    stringify!($field).to_string(),
                                )
                            })?,
                        )?,
                    )+
                })
            }
        }

        impl $crate::IntoValue for $t {
            fn into_value(self) -> $crate::Value {
                $crate::Value::new_obj(self)
            }
        }

        impl $crate::FromValue for $t {
            fn from_value(value: $crate::Value) -> Result<Self, $crate::ConstructionError> {
                match value {
                    $crate::Value::Map(fields) => {
                        <$t as $crate::FromFields>::from_fields(fields)
                    }
                    other => other
                        .into_obj::<$t>()
                        .map_err(|v| $crate::ConstructionError::mismatch(stringify!($t), &v)),
                }
            }
        }
    };
}

/// A builder declaring hand-written encode and decode closures for a mapped type.
///
/// Both closures are required; [`declare`](CustomMapper::declare) fails with a
/// [`MapperContractError`] if either is missing. If a mapper for the identifier already exists
/// the declaration is dropped silently and `Ok(false)` is returned.
///
/// ```rust
/// # use tagson::*;
/// # #[derive(Debug, Clone, PartialEq)]
/// # struct Point { x: i64, y: i64 }
/// # impl_mapped!(Point, "geom.Point", x, y);
/// let mut registry = MapperRegistry::new();
/// let registered = CustomMapper::<Point>::new("geom.Point")
///     .serialize(|p| {
///         let mut fields = Fields::new();
///         fields.insert("coords", vec![p.x, p.y]);
///         fields
///     })
///     .deserialize(|mut fields| {
///         let coords: Vec<i64> = FromValue::from_value(
///             fields
///                 .remove("coords")
///                 .ok_or_else(|| ConstructionError::MissingField("coords".into()))?,
///         )?;
///         Ok(Point { x: coords[0], y: coords[1] })
///     })
///     .declare(&mut registry)
///     .unwrap();
/// assert!(registered);
/// ```
pub struct CustomMapper<T> {
    ident: String,
    serialize: Option<Box<dyn Fn(&T) -> Fields + Send + Sync>>,
    deserialize: Option<Box<dyn Fn(Fields) -> Result<T, ConstructionError> + Send + Sync>>,
}

impl<T: Mapped> CustomMapper<T> {
    /// Start a declaration for the type identifier `ident`.
    pub fn new<I: Into<String>>(ident: I) -> Self {
        CustomMapper {
            ident: ident.into(),
            serialize: None,
            deserialize: None,
        }
    }

    /// The encode direction: flatten a `T` into its wire fields.
    pub fn serialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Fields + Send + Sync + 'static,
    {
        self.serialize = Some(Box::new(f));
        self
    }

    /// The decode direction: rebuild a `T` from its wire fields (tag already removed).
    pub fn deserialize<F>(mut self, f: F) -> Self
    where
        F: Fn(Fields) -> Result<T, ConstructionError> + Send + Sync + 'static,
    {
        self.deserialize = Some(Box::new(f));
        self
    }

    /// Register the mapper. Returns `Ok(true)` if it was installed, `Ok(false)` if a mapper for
    /// the identifier already existed (the existing one stays).
    pub fn declare(self, registry: &mut MapperRegistry) -> Result<bool, MapperContractError> {
        let ser = self
            .serialize
            .ok_or_else(|| MapperContractError::MissingSerialize(self.ident.clone()))?;
        let de = self
            .deserialize
            .ok_or_else(|| MapperContractError::MissingDeserialize(self.ident.clone()))?;

        let tag = self.ident.clone();
        let encode: EncodeFn = Box::new(move |obj: &dyn Mapped| {
            let t = obj.as_any().downcast_ref::<T>().ok_or_else(|| {
                EncodeError::WrongType {
                    tag: tag.clone(),
                    found: obj.ident(),
                }
            })?;
            Ok(ser(t))
        });
        let decode: DecodeFn =
            Box::new(move |fields| de(fields).map(|t| Box::new(t) as Box<dyn Mapped>));

        Ok(registry.register(self.ident, encode, decode))
    }
}
