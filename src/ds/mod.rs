//! The data structures of a tagged JSON document.
//!
//! [`Value`] is the document tree, [`Number`] the unified numeric type, and [`Fields`] the
//! insertion-ordered map used for JSON objects and mapped-object field lists.

mod fields;
mod num;
mod value;

pub use self::fields::Fields;
pub use self::num::{IntoIntError, Number};
pub use self::value::Value;
