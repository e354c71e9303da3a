use super::{Fields, Number};
use crate::mapper::Mapped;
use std::fmt;

/// The in-memory form of a tagged JSON document.
///
/// A `Value` is a tree: the leaf variants mirror the JSON primitives, `Seq` and `Map` mirror the
/// JSON composites, and [`Obj`] holds a typed object that serializes as a JSON object carrying a
/// type tag. Encoding walks the tree with [`to_json`], decoding rebuilds it with [`from_json`].
///
/// Construction usually goes through the constructors or [`IntoValue`]:
///
/// ```rust
/// # use tagson::*;
/// let v = 3.14.into_value();
/// assert_eq!(v.float(), Some(3.14));
///
/// let v = vec![1, 2, 3].into_value();
/// assert_eq!(v.seq().map(|s| s.len()), Some(3));
/// ```
///
/// [`Obj`]: Value::Obj
/// [`to_json`]: crate::fmt::to_json
/// [`from_json`]: crate::parse::from_json
/// [`IntoValue`]: crate::IntoValue
pub enum Value {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. See [`Number`] for the unsigned/signed/float split.
    Num(Number),
    /// A string.
    Str(String),
    /// An ordered sequence, a JSON array.
    Seq(Vec<Value>),
    /// A plain key-value map, a JSON object _without_ a type tag.
    Map(Fields),
    /// A typed object, written as a JSON object with the type tag field last.
    Obj(Box<dyn Mapped>),
}

impl Value {
    /// A new number value. Takes anything convertible into [`Number`].
    pub fn new_num<T: Into<Number>>(value: T) -> Self {
        Value::Num(value.into())
    }

    /// A new string value from a borrowed string.
    pub fn new_str(string: &str) -> Self {
        Value::Str(string.to_string())
    }

    /// A new string value from an owned string.
    pub fn new_string(string: String) -> Self {
        Value::Str(string)
    }

    /// A new map value.
    pub fn new_map<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().collect())
    }

    /// A new typed object value.
    pub fn new_obj<T: Mapped>(obj: T) -> Self {
        Value::Obj(Box::new(obj))
    }

    /// A short name for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
            Value::Obj(_) => "object",
        }
    }

    /// The boolean, if this is a `Bool`.
    pub fn bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number as unsigned, if this is a `Num` representable as `u128`.
    pub fn uint(&self) -> Option<u128> {
        match self {
            Value::Num(n) => n.as_u128().ok(),
            _ => None,
        }
    }

    /// The number as signed, if this is a `Num` representable as `i128`.
    pub fn int(&self) -> Option<i128> {
        match self {
            Value::Num(n) => n.as_i128().ok(),
            _ => None,
        }
    }

    /// The number as a float, if this is a `Num`.
    pub fn float(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// The string slice, if this is a `Str`.
    pub fn str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The sequence, if this is a `Seq`.
    pub fn seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    /// The field map, if this is a `Map`.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Downcast to the concrete type, if this is an `Obj` holding a `T`.
    ///
    /// ```rust
    /// # use tagson::*;
    /// #[derive(Debug, Clone, PartialEq)]
    /// struct Point { x: i64, y: i64 }
    /// impl_mapped!(Point, "geom.Point", x, y);
    ///
    /// let v = Value::new_obj(Point { x: 1, y: 2 });
    /// assert_eq!(v.obj::<Point>(), Some(&Point { x: 1, y: 2 }));
    /// assert_eq!(v.obj::<i64>(), None);
    /// ```
    pub fn obj<T: std::any::Any>(&self) -> Option<&T> {
        match self {
            Value::Obj(o) => o.as_any().downcast_ref(),
            _ => None,
        }
    }

    /// Downcast into the concrete type, if this is an `Obj` holding a `T`.
    /// Returns the value unchanged on a variant or type mismatch.
    pub fn into_obj<T: Mapped>(self) -> Result<T, Value> {
        match self {
            Value::Obj(o) if o.as_any().is::<T>() => {
                Ok(*o.into_any().downcast().expect("type checked above"))
            }
            other => Err(other),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Num(n) => Value::Num(*n),
            Value::Str(s) => Value::Str(s.clone()),
            Value::Seq(s) => Value::Seq(s.clone()),
            Value::Map(m) => Value::Map(m.clone()),
            Value::Obj(o) => Value::Obj(o.clone_mapped()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Num(a), Num(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Seq(a), Seq(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Obj(a), Obj(b)) => a.eq_mapped(b.as_ref()),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Num(n) => f.debug_tuple("Num").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Seq(s) => f.debug_tuple("Seq").field(s).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Value::Obj(o) => f.debug_tuple("Obj").field(&o.ident()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_hit_and_miss() {
        let v = Value::Bool(true);
        assert_eq!(v.bool(), Some(true));
        assert_eq!(v.str(), None);

        let v = Value::new_num(101);
        assert_eq!(v.uint(), Some(101));
        assert_eq!(v.int(), Some(101));
        assert_eq!(v.float(), Some(101.0));

        let v = Value::new_num(-5);
        assert_eq!(v.uint(), None);
        assert_eq!(v.int(), Some(-5));

        let v = Value::new_str("hello");
        assert_eq!(v.str(), Some("hello"));
        assert_eq!(v.bool(), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::new_str("x").kind(), "string");
        assert_eq!(Value::Seq(vec![]).kind(), "sequence");
        assert_eq!(Value::Map(Fields::new()).kind(), "map");
    }

    #[test]
    fn seq_and_map_equality() {
        let a = Value::Seq(vec![Value::Null, Value::Bool(false)]);
        let b = a.clone();
        assert_eq!(a, b);

        let mut m1 = Fields::new();
        m1.insert("k", 1);
        let mut m2 = Fields::new();
        m2.insert("k", 1);
        assert_eq!(Value::Map(m1), Value::Map(m2));
    }
}
