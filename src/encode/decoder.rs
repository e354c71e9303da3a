use super::*;
use serde::de::{
    self,
    value::{MapDeserializer, SeqDeserializer},
    IntoDeserializer, Unexpected, Visitor,
};
use serde::forward_to_deserialize_any;
use std::convert::TryInto;
use std::{error, fmt};

type Res<T> = Result<T, Error>;

/// Decoder to pass to [`Deserialize::deserialize`] to decode a [`Value`] into a type.
///
/// `Decoder` _consumes_ the `Value`, moving owned data straight into the target type. Strings
/// and byte buffers are handed over owned, so any `DeserializeOwned` type works; decoding into
/// types borrowing from the input is not supported.
///
/// ```rust
/// # use tagson::*;
/// use tagson::encode::{Decoder, Deserialize};
///
/// let value = Value::new_str("Hello, world!");
/// let s = <String>::deserialize(Decoder(value)).unwrap();
/// assert_eq!(s, "Hello, world!");
/// ```
///
/// [`Value::decode`](crate::Value::decode) can be used for convenience.
///
/// [`Deserialize::deserialize`]: serde::de::Deserialize::deserialize
pub struct Decoder(pub Value);

impl<'de> de::Deserializer<'de> for Decoder {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Res<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.0 {
            Value::Null => visitor.visit_unit(),
            Value::Bool(v) => visitor.visit_bool(v),
            Value::Num(num) => {
                // serde's integer casting works from a 64 bit basis: expecting a u8 it can
                // downcast from a u64, but it will not downcast from a u128. Only hand over a
                // 128 bit integer when it does not fit in 64 bits.
                match num {
                    Number::Uint(v) => match v.try_into() {
                        Ok(v) => visitor.visit_u64(v),
                        Err(_) => visitor.visit_u128(v),
                    },
                    Number::Int(v) => match v.try_into() {
                        Ok(v) => visitor.visit_i64(v),
                        Err(_) => visitor.visit_i128(v),
                    },
                    Number::Float(v) => visitor.visit_f64(v),
                }
            }
            Value::Str(v) => visitor.visit_string(v),
            Value::Seq(seq) => visitor.visit_seq(SeqDeserializer::new(seq.into_iter())),
            Value::Map(map) => visitor.visit_map(MapDeserializer::new(map.into_iter())),
            Value::Obj(o) => Err(Error::Message(format!(
                "typed object '{}' cannot cross the serde bridge",
                o.ident()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Res<V::Value> {
        if matches!(self.0, Value::Null) {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Res<V::Value> {
        match self.0 {
            Value::Str(s) => {
                if s.chars().count() == 1 {
                    visitor.visit_char(s.chars().next().expect("will be one"))
                } else {
                    Err(de::Error::invalid_type(Unexpected::Str(&s), &"char"))
                }
            }
            x => Err(de::Error::invalid_type(unexp_err(&x), &"char")),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Res<V::Value> {
        match self.0 {
            Value::Str(variant) => visitor.visit_enum(EnumDecoder {
                variant,
                value: None,
            }),
            Value::Map(fields) => {
                let mut iter = fields.into_iter();
                let (variant, value) = iter.next().ok_or_else(single_member_expected)?;
                if iter.next().is_some() {
                    return Err(single_member_expected());
                }
                visitor.visit_enum(EnumDecoder {
                    variant,
                    value: Some(value),
                })
            }
            x => Err(de::Error::invalid_type(
                unexp_err(&x),
                &"an externally tagged enum",
            )),
        }
    }
}

fn single_member_expected() -> Error {
    Error::Message("expected a single-member map for an enum variant".into())
}

impl<'de> de::IntoDeserializer<'de, Error> for Value {
    type Deserializer = Decoder;
    fn into_deserializer(self) -> Decoder {
        Decoder(self)
    }
}

struct EnumDecoder {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDecoder {
    type Error = Error;
    type Variant = VariantDecoder;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, VariantDecoder), Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        let v = seed.deserialize(self.variant.into_deserializer())?;
        Ok((v, VariantDecoder { value: self.value }))
    }
}

struct VariantDecoder {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDecoder {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Error> {
        match self.value {
            None => Ok(()),
            Some(v) => Err(de::Error::invalid_type(unexp_err(&v), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(v) => seed.deserialize(Decoder(v)),
            None => Err(Error::Message(
                "expected a value for the newtype variant".into(),
            )),
        }
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Value::Seq(seq)) => {
                if seq.len() == len {
                    visitor.visit_seq(SeqDeserializer::new(seq.into_iter()))
                } else {
                    let msg = format!("a sequence with {} element(s) was expected", len);
                    Err(de::Error::invalid_length(seq.len(), &msg.as_str()))
                }
            }
            Some(v) => Err(de::Error::invalid_type(unexp_err(&v), &"tuple variant")),
            None => Err(Error::Message(
                "expected a sequence for the tuple variant".into(),
            )),
        }
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Value::Map(map)) => visitor.visit_map(MapDeserializer::new(map.into_iter())),
            Some(v) => Err(de::Error::invalid_type(unexp_err(&v), &"struct variant")),
            None => Err(Error::Message(
                "expected a map for the struct variant".into(),
            )),
        }
    }
}

////// FUNCTIONS ///////////////////////////////////////////////////////////////

fn unexp_err(val: &Value) -> Unexpected {
    match val {
        Value::Null => Unexpected::Unit,
        Value::Bool(v) => Unexpected::Bool(*v),
        Value::Num(n) => match n {
            Number::Uint(n) => Unexpected::Unsigned((*n).try_into().unwrap_or_default()),
            Number::Int(n) => Unexpected::Signed((*n).try_into().unwrap_or_default()),
            Number::Float(n) => Unexpected::Float(*n),
        },
        Value::Str(v) => Unexpected::Str(v.as_str()),
        Value::Seq(_) => Unexpected::Seq,
        Value::Map(_) => Unexpected::Map,
        Value::Obj(_) => Unexpected::Other("typed object"),
    }
}

////// ERROR ///////////////////////////////////////////////////////////////////

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    Message(String),
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message(s) => write!(f, "custom error: {}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Deserialize;
    use serde_derive::{Deserialize, Serialize};

    #[test]
    fn mem_de_round_trips() {
        macro_rules! round_trip_test {
	    ($t:ty, $($x:expr),*) => {{
		$(
		    let value = Value::enc(&$x).unwrap();
		    let de = Decoder(value);
		    let v: $t = <$t>::deserialize(de)
			.expect(concat!("failed deserializing ", stringify!($t)));
		    assert_eq!($x, v, concat!("failed equaling ", stringify!($t)));
		)*
	    }};
	}

        round_trip_test!((), ());
        round_trip_test!(bool, true, false);
        round_trip_test!(char, 'a', 'b', 'c');

        round_trip_test!(u8, u8::MIN, u8::MAX);
        round_trip_test!(u16, u16::MIN, u16::MAX);
        round_trip_test!(u32, u32::MIN, u32::MAX);
        round_trip_test!(u64, u64::MIN, u64::MAX);
        round_trip_test!(u128, u128::MIN, u128::MAX);

        round_trip_test!(i8, i8::MIN, 0, i8::MAX);
        round_trip_test!(i16, i16::MIN, 0, i16::MAX);
        round_trip_test!(i32, i32::MIN, 0, i32::MAX);
        round_trip_test!(i64, i64::MIN, 0, i64::MAX);
        round_trip_test!(i128, i128::MIN, 0, i128::MAX);

        round_trip_test!(
            f64,
            0.0,
            std::f64::consts::E,
            std::f64::consts::PI,
            -std::f64::consts::E,
            -std::f64::consts::PI
        );

        round_trip_test!(
            String,
            "Hello, world!".to_owned(),
            "\nThis is me!".to_owned()
        );

        round_trip_test!(Option<u32>, None::<u32>, Some(33));
        round_trip_test!(Vec<u8>, b"Hello, world!".to_vec());
    }

    #[test]
    fn struct_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Sensor {
            name: String,
            reading: f64,
            online: bool,
        }

        let data = Sensor {
            name: "thermo-1".into(),
            reading: 21.5,
            online: true,
        };
        let value = Value::enc(&data).unwrap();

        // struct fields keep declaration order
        let keys: Vec<_> = value.fields().unwrap().keys().map(str::to_string).collect();
        assert_eq!(keys, ["name", "reading", "online"]);

        assert_eq!(value.decode::<Sensor>(), Ok(data));
    }

    #[test]
    fn enum_round_trips() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        enum Shape {
            Empty,
            Circle(f64),
            Rect(f64, f64),
            Poly { sides: u32 },
        }

        for shape in [
            Shape::Empty,
            Shape::Circle(1.5),
            Shape::Rect(2.0, 4.0),
            Shape::Poly { sides: 6 },
        ] {
            let value = Value::enc(&shape).unwrap();
            assert_eq!(value.decode::<Shape>(), Ok(shape));
        }

        // unit variants encode as their name
        assert_eq!(Value::enc(&Shape::Empty), Ok(Value::new_str("Empty")));
    }

    #[test]
    fn map_keys_must_be_strings() {
        use std::collections::BTreeMap;

        let ok: BTreeMap<String, u32> = [("a".to_string(), 1)].into_iter().collect();
        assert!(Value::enc(&ok).is_ok());

        let bad: BTreeMap<u32, u32> = [(1, 1)].into_iter().collect();
        assert_eq!(Value::enc(&bad), Err(encoder::Error::KeyMustBeString));
    }

    #[test]
    fn typed_objects_do_not_cross() {
        #[derive(Debug, Clone, PartialEq)]
        struct Marker {
            id: u32,
        }
        crate::impl_mapped!(Marker, "test.Marker", id);

        let value = Value::new_obj(Marker { id: 1 });
        let r = value.decode::<u32>().map_err(|e| e.to_string());
        assert_eq!(
            r,
            Err("custom error: typed object 'test.Marker' cannot cross the serde bridge".into())
        );
    }

    #[test]
    fn test_deserialize_char() {
        let value = Value::new_str("x");
        assert_eq!(value.decode::<char>(), Ok('x'));

        let value = Value::new_str("");
        let r = value.decode::<char>().map_err(|x| x.to_string());
        assert_eq!(
            r,
            Err("custom error: invalid type: string \"\", expected char".into())
        );
    }
}
