//! Parsing tagged JSON text back into a [`Value`] tree.
//!
//! [`parse`] is the raw half: strict JSON text to a tree of primitives, sequences, and maps.
//! [`from_json`] layers the tag protocol on top, walking the parsed tree bottom-up and replacing
//! every map that carries a recognized type tag with the reconstructed [`Value::Obj`].
//!
//! Parse failures carry a hierarchy of locations; [`Error::backtrace`] renders it with caret
//! markers against the offending lines.

mod err;
mod prims;
mod wsp;

use crate::ds::{Fields, Number, Value};
use crate::fmt::META_FIELD;
use crate::mapper::{ConstructionError, MapperRegistry};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, cut, map, opt, recognize},
    error::{self, context, ContextError, ErrorKind, ParseError, VerboseErrorKind},
    multi::separated_list0,
    sequence::{pair, preceded, separated_pair, terminated, tuple},
    Err, IResult,
};
use prims::*;
use std::collections::BTreeMap;
use std::fmt;
use wsp::*;

pub(crate) trait CxErr<'a>: ParseError<&'a str> + ContextError<&'a str> {}
impl<'a, T: ParseError<&'a str> + ContextError<&'a str>> CxErr<'a> for T {}

/// A hierarchy of errors which provide a trace of where a parse failure originates.
///
/// JSON nests, so a failure deep inside a structure carries the chain of enclosing locations.
/// `Error` holds this hierarchy and can provide individual [`Trace`]s or a rendered
/// [`backtrace`](Error::backtrace).
#[derive(PartialEq)]
pub struct Error<'a> {
    /// Format `(offset, error_kind)`.
    errs: Vec<(usize, VerboseErrorKind)>,
    /// Format `(line_offset, (line_idx, line))`.
    lines: BTreeMap<usize, (usize, &'a str)>,
    empty_input: bool,
}

/// A location where an error occurred.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Trace<'a> {
    /// The line number that the trace is on. One-based, but can be zero if the input was empty.
    pub line: usize,
    /// The column number that the trace is on. One-based, but can be zero if the input was empty.
    pub col: usize,
    /// The line contents as a string.
    pub linestr: &'a str,
    /// The error message.
    pub msg: String,
}

fn json_value<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, Value, E> {
    ignore_whitespace(alt((
        literal,
        map(string, Value::Str),
        map(number, Value::Num),
        array,
        object,
    )))(i)
}

fn array<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, Value, E> {
    context(
        "array",
        map(
            preceded(
                char('['),
                cut(terminated(
                    separated_list0(ignore_whitespace(char(',')), json_value),
                    ignore_whitespace(char(']')),
                )),
            ),
            Value::Seq,
        ),
    )(i)
}

fn member<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, (String, Value), E> {
    context(
        "object member",
        separated_pair(
            ignore_whitespace(string),
            cut(ignore_whitespace(char(':'))),
            cut(json_value),
        ),
    )(i)
}

fn object<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, Value, E> {
    context(
        "object",
        map(
            preceded(
                char('{'),
                cut(terminated(
                    separated_list0(ignore_whitespace(char(',')), member),
                    ignore_whitespace(char('}')),
                )),
            ),
            // duplicate keys: the last value wins, the first position is kept
            |members| Value::Map(members.into_iter().collect()),
        ),
    )(i)
}

fn json_root<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, Value, E> {
    if i.trim().is_empty() {
        context("empty input", |i| {
            Err(Err::Error(error::make_error(i, ErrorKind::Eof)))
        })(i)
    } else {
        all_consuming(terminated(json_value, whitespace))(i)
    }
}

/// Attempt to parse JSON text into a raw [`Value`] tree.
///
/// This is the registry-free half of decoding: the result contains no [`Value::Obj`] nodes, type
/// tags are left as ordinary `"__meta"` members. Use [`from_json`] to also reconstruct typed
/// objects.
///
/// # Example
///
/// Successfully parse.
///
/// ```rust
/// # use tagson::*;
/// use tagson::parse::parse;
///
/// let value = parse(r#"{"on": true, "dims": [1.5, 2.5]}"#).unwrap();
///
/// let expected = Value::new_map(vec![
///     ("on".to_string(), Value::Bool(true)),
///     (
///         "dims".to_string(),
///         Value::Seq(vec![Value::new_num(1.5), Value::new_num(2.5)]),
///     ),
/// ]);
///
/// assert_eq!(value, expected);
/// ```
///
/// Fail to parse.
///
/// ```rust
/// use tagson::parse::parse;
///
/// let parse = parse(r#"{"a": 1]"#);
///
/// assert!(parse.is_err());
///
/// // output a backtrace
/// assert_eq!(
///     parse.unwrap_err().backtrace(),
///     r##"#0: at 1:8 :: expected '}', found ']'
/// {"a": 1]
///        ^
///
/// #1: at 1:1 :: in object
/// {"a": 1]
/// ^"##
/// );
/// ```
pub fn parse(s: &str) -> Result<Value, Error> {
    json_root::<nom::error::VerboseError<_>>(s)
        .map(|x| x.1)
        .map_err(|e| match e {
            Err::Error(x) | Err::Failure(x) => Error::new(s, x),
            Err::Incomplete(_) => {
                unreachable!("all parsers use complete versions so no incomplete possible")
            }
        })
}

/// Failure to decode tagged JSON text.
#[derive(Debug, PartialEq)]
pub enum DecodeError<'a> {
    /// The text is not valid JSON.
    Parse(Error<'a>),
    /// The JSON was valid but a registered decoder could not rebuild its object.
    Construction(ConstructionError),
}

impl<'a> fmt::Display for DecodeError<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::Parse(e) => write!(f, "invalid JSON\n{}", e.backtrace()),
            DecodeError::Construction(e) => write!(f, "{}", e),
        }
    }
}

impl<'a> std::error::Error for DecodeError<'a> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Parse(_) => None,
            DecodeError::Construction(e) => Some(e),
        }
    }
}

/// Decode tagged JSON text into a [`Value`], reconstructing typed objects through `registry`.
///
/// The parsed tree is decoded bottom-up: the members of an object are reconstructed before the
/// object itself, so a decoder always receives its nested instances in final form. An object
/// whose `"__meta"` tag has no registered decoder stays a plain [`Value::Map`], tag included, so
/// external data with unknown tags still round-trips.
///
/// ```rust
/// # use tagson::*;
/// #[derive(Debug, Clone, PartialEq)]
/// struct Point { x: i64, y: i64 }
/// impl_mapped!(Point, "geom.Point", x, y);
///
/// let mut registry = MapperRegistry::new();
/// let point = Point { x: 1, y: 2 };
/// let json = to_json(&Value::new_obj(point.clone()), &mut registry).unwrap();
///
/// let value = from_json(&json, &registry).unwrap();
/// assert_eq!(value.obj::<Point>(), Some(&point));
/// ```
pub fn from_json<'a>(text: &'a str, registry: &MapperRegistry) -> Result<Value, DecodeError<'a>> {
    let value = parse(text).map_err(DecodeError::Parse)?;
    decode_node(value, registry).map_err(DecodeError::Construction)
}

fn decode_node(value: Value, registry: &MapperRegistry) -> Result<Value, ConstructionError> {
    match value {
        Value::Seq(seq) => seq
            .into_iter()
            .map(|v| decode_node(v, registry))
            .collect::<Result<_, _>>()
            .map(Value::Seq),
        Value::Map(fields) => {
            let mut decoded = Fields::with_capacity(fields.len());
            for (key, val) in fields {
                decoded.insert(key, decode_node(val, registry)?);
            }

            let tag = decoded
                .get(META_FIELD)
                .and_then(|v| v.str())
                .map(str::to_string);
            if let Some(tag) = tag {
                if let Some(decode) = registry.decoder(&tag) {
                    decoded.remove(META_FIELD);
                    return decode(decoded).map(Value::Obj);
                }
            }

            Ok(Value::Map(decoded))
        }
        leaf => Ok(leaf),
    }
}
