//! Conversions between Rust types and [`Value`].
//!
//! [`IntoValue`] is the infallible direction, used pervasively when building documents and field
//! lists. [`FromValue`] is the fallible direction, used when reconstructing typed objects from
//! decoded fields; failures surface as [`ConstructionError`]s carrying the expected and found
//! kinds.
//!
//! Mapped types get both implementations generated by [`impl_mapped!`](crate::impl_mapped).

use crate::ds::{Fields, Number, Value};
use crate::mapper::ConstructionError;

/// Convert a Rust value into a [`Value`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Reconstruct a Rust value from a [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ConstructionError>;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        Ok(value)
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        value
            .bool()
            .ok_or_else(|| ConstructionError::mismatch("bool", &value))
    }
}

impl IntoValue for Number {
    fn into_value(self) -> Value {
        Value::Num(self)
    }
}

impl FromValue for Number {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        match value {
            Value::Num(n) => Ok(n),
            other => Err(ConstructionError::mismatch("number", &other)),
        }
    }
}

macro_rules! value_uint {
    ($($t:ty),*) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> Value {
                    Value::Num(self.into())
                }
            }

            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, ConstructionError> {
                    value
                        .uint()
                        .and_then(|n| n.try_into().ok())
                        .ok_or_else(|| ConstructionError::mismatch(stringify!($t), &value))
                }
            }
        )*
    };
}

macro_rules! value_int {
    ($($t:ty),*) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> Value {
                    Value::Num(self.into())
                }
            }

            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, ConstructionError> {
                    value
                        .int()
                        .and_then(|n| n.try_into().ok())
                        .ok_or_else(|| ConstructionError::mismatch(stringify!($t), &value))
                }
            }
        )*
    };
}

value_uint!(usize, u8, u16, u32, u64, u128);
value_int!(isize, i8, i16, i32, i64, i128);

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Num(self.into())
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        value
            .float()
            .map(|f| f as f32)
            .ok_or_else(|| ConstructionError::mismatch("f32", &value))
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Num(self.into())
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        value
            .float()
            .ok_or_else(|| ConstructionError::mismatch("f64", &value))
    }
}

impl IntoValue for char {
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::new_str(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(ConstructionError::mismatch("string", &other)),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Seq(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        match value {
            Value::Seq(seq) => seq.into_iter().map(T::from_value).collect(),
            other => Err(ConstructionError::mismatch("sequence", &other)),
        }
    }
}

impl IntoValue for Fields {
    fn into_value(self) -> Value {
        Value::Map(self)
    }
}

macro_rules! value_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Value {
                    v.into_value()
                }
            }
        )*
    };
}

value_from!(
    bool, Number, usize, u8, u16, u32, u64, u128, isize, i8, i16, i32, i64, i128, f32, f64, char,
    &str, String, Fields
);

impl<T: IntoValue> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value {
        v.into_value()
    }
}

impl FromValue for Fields {
    fn from_value(value: Value) -> Result<Self, ConstructionError> {
        match value {
            Value::Map(m) => Ok(m),
            other => Err(ConstructionError::mismatch("map", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};

    fn random_string() -> String {
        let mut rng = thread_rng();
        let len = rng.gen_range(0..64);
        std::iter::repeat_with(|| rng.gen::<char>()).take(len).collect()
    }

    #[test]
    fn randomized_round_trips() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            let n = rng.gen::<u64>();
            assert_eq!(u64::from_value(n.into_value()), Ok(n));
            let n = rng.gen::<i64>();
            assert_eq!(i64::from_value(n.into_value()), Ok(n));
            let s = random_string();
            assert_eq!(String::from_value(s.clone().into_value()), Ok(s));
        }
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(42u8.into_value(), Value::new_num(42));
        assert_eq!((-7i64).into_value(), Value::new_num(-7));
        assert_eq!(u8::from_value(Value::new_num(200)), Ok(200));
        assert!(u8::from_value(Value::new_num(300)).is_err());
        assert!(u32::from_value(Value::new_num(-1)).is_err());
        assert_eq!(f64::from_value(Value::new_num(1.5)), Ok(1.5));
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Option::<u32>::None.into_value(), Value::Null);
        assert_eq!(Some(3u32).into_value(), Value::new_num(3));
        assert_eq!(Option::<u32>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<u32>::from_value(Value::new_num(3)), Ok(Some(3)));
    }

    #[test]
    fn sequence_round_trip() {
        let v = vec![1u32, 2, 3].into_value();
        assert_eq!(Vec::<u32>::from_value(v), Ok(vec![1, 2, 3]));
        assert!(Vec::<u32>::from_value(Value::Bool(true)).is_err());
    }

    #[test]
    fn mismatch_reports_kinds() {
        let err = String::from_value(Value::new_num(1)).unwrap_err();
        assert_eq!(err.to_string(), "expected string, found number");
    }
}
