use super::*;
use serde::{ser, Serialize};
use std::{error, fmt};

type Res = Result<Value, Error>;

/// Encoder to pass to [`Serialize::serialize`] to encode a type into a [`Value`].
///
/// There is no data associated with the `Encoder`, instead it is used to implement `serde`'s
/// `Serializer` trait. It can be used to encode a data type that implements [`Serialize`] like
/// so:
/// ```rust
/// # use tagson::*;
/// use tagson::encode::{Encoder, Serialize};
///
/// let data = ("Hello!", 3.5);
/// let expected = Value::Seq(vec![
///     Value::new_str("Hello!"),
///     Value::new_num(3.5),
/// ]);
///
/// let value = data.serialize(Encoder);
/// assert_eq!(value, Ok(expected));
/// ```
///
/// The output is shaped like the JSON it will eventually serialize to: tuples and byte arrays
/// become sequences, unit values and `None` become null, struct fields keep declaration order,
/// and map keys must serialize to strings. There is also a helper function [`Value::enc`] that
/// can encode without importing the `Encoder`.
///
/// [`Serialize::serialize`]: serde::Serialize::serialize
pub struct Encoder;

impl ser::Serializer for Encoder {
    type Ok = Value;
    type Error = Error;
    type SerializeSeq = SeqLike;
    type SerializeTuple = SeqLike;
    type SerializeTupleStruct = SeqLike;
    type SerializeTupleVariant = VariantSeqLike;
    type SerializeMap = MapLike;
    type SerializeStruct = StructLike;
    type SerializeStructVariant = VariantMapLike;

    fn serialize_bool(self, v: bool) -> Res {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_i16(self, v: i16) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_i32(self, v: i32) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_i64(self, v: i64) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_i128(self, v: i128) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_u8(self, v: u8) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_u16(self, v: u16) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_u32(self, v: u32) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_u64(self, v: u64) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_u128(self, v: u128) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_f32(self, v: f32) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_f64(self, v: f64) -> Res {
        Ok(Value::new_num(v))
    }

    fn serialize_char(self, v: char) -> Res {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Res {
        Ok(Value::new_str(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Res {
        Ok(Value::Seq(v.iter().map(|&b| Value::new_num(b)).collect()))
    }

    fn serialize_none(self) -> Res {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, v: &T) -> Res {
        v.serialize(self)
    }

    fn serialize_unit(self) -> Res {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Res {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(self, _: &'static str, _: u32, variant: &'static str) -> Res {
        Ok(Value::new_str(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Res {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        value: &T,
    ) -> Res {
        let mut fields = Fields::with_capacity(1);
        fields.insert(variant, value.serialize(self)?);
        Ok(Value::Map(fields))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqLike, Error> {
        Ok(SeqLike {
            seq: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqLike, Error> {
        Ok(SeqLike {
            seq: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqLike, Error> {
        Ok(SeqLike {
            seq: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantSeqLike, Error> {
        Ok(VariantSeqLike {
            variant,
            seq: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapLike, Error> {
        Ok(MapLike {
            key: None,
            map: Fields::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<StructLike, Error> {
        Ok(StructLike {
            fields: Fields::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantMapLike, Error> {
        Ok(VariantMapLike {
            variant,
            fields: Fields::with_capacity(len),
        })
    }

    fn collect_str<T: ?Sized>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: std::fmt::Display,
    {
        self.serialize_str(&value.to_string())
    }
}

/// Value serialization error.
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// An implementor of `Serialize` called `serialize_value` before `serialize_key` when
    /// serializing a map. This error is extremely rare and would only occur where the implementor
    /// does not follow the guidance from `serde`.
    NoKeyAvailable,
    /// A map key serialized to something other than a string. JSON object member names are
    /// strings, so only string-like keys can cross the bridge.
    KeyMustBeString,
    /// Some `Serialize` implementor error occurred.
    Message(String),
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoKeyAvailable => {
                write!(f, "no key was available when trying to serialize map value")
            }
            Error::KeyMustBeString => write!(f, "map keys must serialize to strings"),
            Error::Message(s) => write!(f, "custom error: {}", s),
        }
    }
}

fn string_key(key: Value) -> Result<String, Error> {
    match key {
        Value::Str(s) => Ok(s),
        _ => Err(Error::KeyMustBeString),
    }
}

pub struct SeqLike {
    seq: Vec<Value>,
}

impl ser::SerializeSeq for SeqLike {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.seq.push(value.serialize(Encoder)?);
        Ok(())
    }

    fn end(self) -> Res {
        Ok(Value::Seq(self.seq))
    }
}

impl ser::SerializeTuple for SeqLike {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.seq.push(value.serialize(Encoder)?);
        Ok(())
    }

    fn end(self) -> Res {
        Ok(Value::Seq(self.seq))
    }
}

impl ser::SerializeTupleStruct for SeqLike {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.seq.push(value.serialize(Encoder)?);
        Ok(())
    }

    fn end(self) -> Res {
        Ok(Value::Seq(self.seq))
    }
}

pub struct VariantSeqLike {
    variant: &'static str,
    seq: Vec<Value>,
}

impl ser::SerializeTupleVariant for VariantSeqLike {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.seq.push(value.serialize(Encoder)?);
        Ok(())
    }

    fn end(self) -> Res {
        let mut fields = Fields::with_capacity(1);
        fields.insert(self.variant, Value::Seq(self.seq));
        Ok(Value::Map(fields))
    }
}

pub struct MapLike {
    key: Option<String>,
    map: Fields,
}

impl ser::SerializeMap for MapLike {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Error> {
        self.key = Some(string_key(key.serialize(Encoder)?)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        let key = self.key.take().ok_or(Error::NoKeyAvailable)?;
        self.map.insert(key, value.serialize(Encoder)?);
        Ok(())
    }

    fn serialize_entry<K, V>(&mut self, key: &K, value: &V) -> Result<(), Error>
    where
        K: ?Sized + Serialize,
        V: ?Sized + Serialize,
    {
        let key = string_key(key.serialize(Encoder)?)?;
        self.map.insert(key, value.serialize(Encoder)?);
        Ok(())
    }

    fn end(self) -> Res {
        Ok(Value::Map(self.map))
    }
}

pub struct StructLike {
    fields: Fields,
}

impl ser::SerializeStruct for StructLike {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.fields.insert(key, value.serialize(Encoder)?);
        Ok(())
    }

    fn end(self) -> Res {
        Ok(Value::Map(self.fields))
    }
}

pub struct VariantMapLike {
    variant: &'static str,
    fields: Fields,
}

impl ser::SerializeStructVariant for VariantMapLike {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.fields.insert(key, value.serialize(Encoder)?);
        Ok(())
    }

    fn end(self) -> Res {
        let mut fields = Fields::with_capacity(1);
        fields.insert(self.variant, Value::Map(self.fields));
        Ok(Value::Map(fields))
    }
}
