//! Encoding a [`Value`] tree into tagged JSON text.
//!
//! [`to_json`] walks the tree and writes compact JSON with `", "` and `": "` member separators.
//! Typed objects are flattened through the registry: the first encode of an unregistered type
//! installs that type's generated mapper as a side effect, which is why the registry is taken
//! mutably.

use crate::ds::{Number, Value};
use crate::mapper::MapperRegistry;
use std::fmt;

mod prims;

pub(crate) use self::prims::{write_number, write_string};

/// The type tag field name.
pub const META_FIELD: &str = "__meta";

/// Failure while encoding a [`Value`] to JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A float with no JSON representation (NaN or an infinity).
    NonFiniteNumber,
    /// The encoder registered under `tag` was handed an object of a different type.
    WrongType {
        tag: String,
        found: &'static str,
    },
    /// A custom encoder failed with its own message.
    Message(String),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::NonFiniteNumber => {
                write!(f, "number has no JSON representation (NaN or infinity)")
            }
            EncodeError::WrongType { tag, found } => {
                write!(f, "encoder for '{}' was handed an object tagged '{}'", tag, found)
            }
            EncodeError::Message(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Encode a [`Value`] as tagged JSON text.
///
/// Typed objects are written as JSON objects with their fields in declaration order and the type
/// tag last. Encountering an unregistered typed object registers its generated mapper in
/// `registry` before encoding it, so later decodes through the same registry recognize the tag.
///
/// ```rust
/// # use tagson::*;
/// let mut registry = MapperRegistry::new();
/// let value = Value::new_map(vec![
///     ("id".to_string(), Value::new_num(7)),
///     ("name".to_string(), Value::new_str("seven")),
/// ]);
/// let json = to_json(&value, &mut registry).unwrap();
/// assert_eq!(json, r#"{"id": 7, "name": "seven"}"#);
/// ```
pub fn to_json(value: &Value, registry: &mut MapperRegistry) -> Result<String, EncodeError> {
    let mut buf = String::new();
    write_value(&mut buf, value, registry)?;
    Ok(buf)
}

fn write_value(
    buf: &mut String,
    value: &Value,
    registry: &mut MapperRegistry,
) -> Result<(), EncodeError> {
    match value {
        Value::Null => buf.push_str("null"),
        Value::Bool(true) => buf.push_str("true"),
        Value::Bool(false) => buf.push_str("false"),
        Value::Num(n) => write_num(buf, n)?,
        Value::Str(s) => write_string(buf, s),
        Value::Seq(seq) => {
            buf.push('[');
            for (i, elem) in seq.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                write_value(buf, elem, registry)?;
            }
            buf.push(']');
        }
        Value::Map(fields) => {
            buf.push('{');
            for (i, (key, val)) in fields.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                write_string(buf, key);
                buf.push_str(": ");
                write_value(buf, val, registry)?;
            }
            buf.push('}');
        }
        Value::Obj(obj) => {
            let ident = obj.ident();
            let mut fields = match registry.encoder(ident) {
                Some(encode) => encode(obj.as_ref())?,
                None => {
                    obj.register_default(registry);
                    fields_via_registry(obj.as_ref(), registry)?
                }
            };
            // mirror a mapper that emitted the tag itself: replace in place, else append
            fields.insert(META_FIELD, Value::new_str(ident));
            write_value(buf, &Value::Map(fields), registry)?;
        }
    }
    Ok(())
}

fn fields_via_registry(
    obj: &dyn crate::Mapped,
    registry: &MapperRegistry,
) -> Result<crate::Fields, EncodeError> {
    match registry.encoder(obj.ident()) {
        Some(encode) => encode(obj),
        // register_default is a no-op only when an entry exists, so this arm is unreachable;
        // fall back to the generated field list rather than panicking
        None => Ok(obj.to_fields()),
    }
}

fn write_num(buf: &mut String, num: &Number) -> Result<(), EncodeError> {
    if !num.is_json_representable() {
        return Err(EncodeError::NonFiniteNumber);
    }
    write_number(buf, num);
    Ok(())
}
