use std::cmp::Ordering;
use std::convert::TryInto;
use std::fmt;
use Number::*;

/// A JSON numerical value.
///
/// JSON does not distinguish number classes, but a faithful round-trip needs to: `18446744073709551615`
/// must not be squeezed through an `f64`, and `1.0` written as `1` must still compare equal when it
/// parses back as an integer. `Number` therefore stores the widest Rust primitive of each class
/// (128 bits for integers, 64 bits for floats) and canonicalizes comparisons _across_ classes:
/// `Eq` and `Ord` are implemented between integers and floats.
///
/// The number line extends from negative infinity, through zero, to positive infinity, with NaN
/// placed above positive infinity. All zeroes are treated equally (`-0 == +0`), as are all NaNs.
///
/// `[ -∞, .., 0, .., +∞, NaN ]`
///
/// Note that non-finite floats can be _stored_ and compared, but they are rejected by the JSON
/// writer since the wire format has no representation for them.
///
/// # Examples
/// `Number` can be constructed straight from any of the Rust numbers using the `From` trait.
/// ```rust
/// # use tagson::*;
/// let n: Number = 123456u32.into();
/// assert_eq!(n, Number::Uint(123456));
/// ```
///
/// Comparisons can be made between different number classes.
/// ```rust
/// # use tagson::*;
/// let n = Number::from(100u8);
/// assert_eq!(n, Number::from(100.0f32));
/// assert_eq!(n, Number::from(100i32));
/// assert_ne!(n, Number::from(99.99f64));
/// ```
///
/// `PartialEq` is also implemented against the Rust primitives directly.
/// ```rust
/// # use tagson::*;
/// let n = Number::from(100u8);
/// assert_eq!(n, 100.0f32);
/// assert_eq!(n, 100i32);
/// assert_ne!(n, 99.99);
/// ```
#[derive(Copy, Clone, Debug)]
#[allow(missing_docs)]
pub enum Number {
    Uint(u128),
    Int(i128),
    Float(f64),
}

/// Converting into a signed or unsigned integer can fail if the original number is outside the
/// integer's valid range.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IntoIntError;

impl Number {
    /// Represent `Number` as an unsigned integer.
    ///
    /// Floats convert if their fractional part is negligible (under `1e-10`).
    ///
    /// # Example
    /// ```rust
    /// # use tagson::*;
    /// use tagson::ds::IntoIntError;
    ///
    /// assert_eq!(Number::from(100i32).as_u128(), Ok(100));
    /// assert_eq!(Number::from(100.0).as_u128(), Ok(100));
    /// assert_eq!(Number::from(-100i32).as_u128(), Err(IntoIntError));
    /// assert_eq!(Number::from(0.5).as_u128(), Err(IntoIntError));
    /// assert_eq!(Number::from(f64::NAN).as_u128(), Err(IntoIntError));
    /// ```
    pub fn as_u128(&self) -> Result<u128, IntoIntError> {
        match self {
            Uint(x) => Ok(*x),
            Int(x) => (*x).try_into().map_err(|_| IntoIntError),
            Float(x) => {
                if x.is_finite() && *x >= 0.0 && x.fract() < 1e-10 {
                    Ok(*x as u128)
                } else {
                    Err(IntoIntError)
                }
            }
        }
    }

    /// Represent `Number` as a signed integer.
    ///
    /// # Example
    /// ```rust
    /// # use tagson::*;
    /// use tagson::ds::IntoIntError;
    ///
    /// assert_eq!(Number::from(100u32).as_i128(), Ok(100));
    /// assert_eq!(Number::from(-100.0).as_i128(), Ok(-100));
    /// assert_eq!(Number::from(0.5).as_i128(), Err(IntoIntError));
    /// assert_eq!(Number::from(f64::INFINITY).as_i128(), Err(IntoIntError));
    /// ```
    pub fn as_i128(&self) -> Result<i128, IntoIntError> {
        match self {
            Uint(x) => (*x).try_into().map_err(|_| IntoIntError),
            Int(x) => Ok(*x),
            Float(x) => {
                if x.is_finite() && x.fract().abs() < 1e-10 {
                    Ok(*x as i128)
                } else {
                    Err(IntoIntError)
                }
            }
        }
    }

    /// Represent `Number` as a floating point decimal.
    /// Does not fail, but is a lossy conversion for large integers.
    ///
    /// # Example
    /// ```rust
    /// # use tagson::*;
    /// assert_eq!(Number::from(100u8).as_f64(), 100.0);
    /// assert_eq!(Number::from(-100).as_f64(), -100.0);
    /// ```
    pub fn as_f64(&self) -> f64 {
        match *self {
            Uint(x) => x as f64,
            Int(x) => x as f64,
            Float(x) => x,
        }
    }

    /// Whether the number can be written as JSON text. Only non-finite floats fail.
    pub fn is_json_representable(&self) -> bool {
        match self {
            Float(x) => x.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uint(x) => write!(f, "{}", x),
            Int(x) => write!(f, "{}", x),
            Float(x) => write!(f, "{}", x),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Uint(lhs), Uint(rhs)) => lhs.eq(rhs),
            (Int(lhs), Int(rhs)) => lhs.eq(rhs),
            (Float(lhs), Float(rhs)) => cmp_floats(*lhs, *rhs) == Ordering::Equal,

            (Uint(lhs), Int(_)) => other.as_u128().map(|rhs| lhs.eq(&rhs)).unwrap_or(false),
            (Uint(lhs), Float(_)) => other.as_u128().map(|rhs| lhs.eq(&rhs)).unwrap_or(false),
            (Int(lhs), Uint(_)) => other.as_i128().map(|rhs| lhs.eq(&rhs)).unwrap_or(false),
            (Int(lhs), Float(_)) => other.as_i128().map(|rhs| lhs.eq(&rhs)).unwrap_or(false),

            (Float(lhs), Uint(_)) => lhs.eq(&other.as_f64()),
            (Float(lhs), Int(_)) => lhs.eq(&other.as_f64()),
        }
    }
}

impl Eq for Number {}

macro_rules! partial_eq_impl {
    ( $( $t:ty ),* ) => {
	$(
	impl PartialEq<$t> for Number {
	    fn eq(&self, rhs: &$t) -> bool {
		self.eq(&Number::from(*rhs))
	    }
	}
	)*
    };
}

partial_eq_impl!(usize, u8, u16, u32, u64, u128, isize, i8, i16, i32, i64, i128, f32, f64);

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Number) -> Ordering {
        match (*self, *other) {
            (Uint(lhs), Uint(rhs)) => lhs.cmp(&rhs),
            (Int(lhs), Int(rhs)) => lhs.cmp(&rhs),
            (Float(lhs), Float(rhs)) => cmp_floats(lhs, rhs),

            (Uint(lhs), Int(rhs)) => cmp_uint_to_int(lhs, rhs),
            (Int(lhs), Uint(rhs)) => cmp_uint_to_int(rhs, lhs).reverse(),

            (Float(lhs), Uint(rhs)) => cmp_float_to_uint(lhs, rhs),
            (Uint(lhs), Float(rhs)) => cmp_float_to_uint(rhs, lhs).reverse(),
            (Float(lhs), Int(rhs)) => cmp_float_to_int(lhs, rhs),
            (Int(lhs), Float(rhs)) => cmp_float_to_int(rhs, lhs).reverse(),
        }
    }
}

/// `[ -INF | ... | 0 | ... | +INF | NaN ]`
fn cmp_floats(lhs: f64, rhs: f64) -> Ordering {
    match lhs.partial_cmp(&rhs) {
        Some(ordering) => ordering,
        None => {
            // at least one NaN; NaNs sit together above +INF
            if lhs.is_nan() {
                if rhs.is_nan() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            } else {
                Ordering::Less
            }
        }
    }
}

fn cmp_uint_to_int(lhs: u128, rhs: i128) -> Ordering {
    match u128::try_from(rhs) {
        Ok(rhs) => lhs.cmp(&rhs),
        Err(_) => Ordering::Greater, // rhs negative
    }
}

fn cmp_float_to_uint(lhs: f64, rhs: u128) -> Ordering {
    use Ordering::*;

    if lhs.is_sign_negative() {
        Less
    } else if lhs.is_infinite() || lhs.is_nan() {
        Greater
    } else {
        let (floor, ceil) = (lhs.floor() as u128, lhs.ceil() as u128);

        match (floor.cmp(&rhs), ceil.cmp(&rhs)) {
            (Less, Less) => Less,
            (Less, Equal) => Less,
            (Equal, Equal) => Equal,
            (Equal, Greater) => Greater,
            (Greater, Greater) => Greater,
            _ => unreachable!("bounded between floor and ceil"),
        }
    }
}

fn cmp_float_to_int(lhs: f64, rhs: i128) -> Ordering {
    use Ordering::*;

    if lhs.is_sign_negative() && lhs.is_infinite() {
        Less
    } else if lhs.is_infinite() || lhs.is_nan() {
        Greater
    } else {
        let (floor, ceil) = (lhs.floor() as i128, lhs.ceil() as i128);

        match (floor.cmp(&rhs), ceil.cmp(&rhs)) {
            (Less, Less) => Less,
            (Less, Equal) => Less,
            (Equal, Equal) => Equal,
            (Equal, Greater) => Greater,
            (Greater, Greater) => Greater,
            _ => unreachable!("bounded between floor and ceil"),
        }
    }
}

macro_rules! fr_uint {
	( $( $t:ty ),* ) => {
		$(
			impl From<$t> for Number {
				fn from(x: $t) -> Self {
					Number::Uint(x as u128)
				}
			}
		)*
	};
}

macro_rules! fr_int {
	( $( $t:ty ),* ) => {
		$(
			impl From<$t> for Number {
				fn from(x: $t) -> Self {
					Number::Int(x as i128)
				}
			}
		)*
	};
}

fr_uint!(usize, u8, u16, u32, u64, u128);
fr_int!(isize, i8, i16, i32, i64, i128);

impl From<f32> for Number {
    fn from(x: f32) -> Self {
        // going through the shortest decimal representation avoids picking up
        // widening noise (0.1f32 as f64 != 0.1f64)
        Number::Float(x.to_string().parse::<f64>().expect("f32 always reparses"))
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}
