//! [`Encoder`] and [`Decoder`] for converting between data structures and [`Value`].
//!
//! Requires the _encode_ feature.
//!
//! This is the untagged bridge to [`serde`]: any type implementing [`Serialize`] can be _encoded_
//! into a plain `Value` tree, and a `Value` can be _decoded_ back into any type implementing
//! [`Deserialize`]. No type tags are involved; the bridge is handy for building field maps inside
//! custom mappers and for pulling leaf data back out. [`Value::Obj`] nodes are not reachable
//! through serde and error when decoded.
//!
//! Enums follow the externally tagged JSON convention: a unit variant encodes as its name, any
//! other variant as a single-member map keyed by the name.
//!
//! # Examples
//! Encoding can be done for any type that implements [`Serialize`].
//!
//! ```rust
//! # use tagson::*;
//! let data = vec![100u32, 200, 300];
//!
//! let expected = Value::Seq(vec![
//!     Value::new_num(100),
//!     Value::new_num(200),
//!     Value::new_num(300),
//! ]);
//!
//! let value = Value::enc(&data);
//! assert_eq!(value, Ok(expected));
//! ```
//!
//! Decoding can be done for any type that implements [`Deserialize`].
//! ```rust
//! # use tagson::*;
//! let value = Value::Seq(vec![
//!     Value::new_num(100),
//!     Value::new_num(200),
//!     Value::new_num(300),
//! ]);
//!
//! let r = value.decode::<Vec<u32>>();
//! assert_eq!(r, Ok(vec![100, 200, 300]));
//! ```
//!
//! [`Deserialize`]: crate::encode::Deserialize
//! [`Serialize`]: crate::encode::Serialize
//! [`serde`]: serde
use crate::ds::{Fields, Number, Value};

mod decoder;
mod encoder;

pub use self::decoder::Decoder;
pub use self::encoder::Encoder;
pub use serde::{Deserialize, Serialize};

impl Value {
    /// Encode `T` into a plain (untagged) `Value`.
    ///
    /// Requires the _encode_ feature.
    ///
    /// Convenience function for `data.serialize(Encoder)`.
    pub fn enc<T: Serialize>(data: &T) -> Result<Self, encoder::Error> {
        data.serialize(Encoder)
    }

    /// Attempt to decode a `Value` into type `T`.
    ///
    /// Requires the _encode_ feature.
    ///
    /// Convenience function for `T::deserialize(Decoder(self))`.
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> Result<T, decoder::Error> {
        T::deserialize(Decoder(self))
    }
}
