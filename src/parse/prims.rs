use super::*;

/// One of the three JSON literals.
pub(super) fn literal<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, Value, E> {
    context(
        "literal",
        alt((
            map(tag("null"), |_| Value::Null),
            map(tag("true"), |_| Value::Bool(true)),
            map(tag("false"), |_| Value::Bool(false)),
        )),
    )(i)
}

/// A JSON number, strict grammar: no leading `+`, no leading zeros, fraction and exponent
/// require at least one digit.
///
/// Purely integral text lands in the integer classes (`Uint`, or `Int` when negative); anything
/// with a fraction or exponent, and integers too large for 128 bits, goes through `fast-float`
/// into the float class.
pub(super) fn number<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, Number, E> {
    let (rest, text) = context(
        "number",
        recognize(tuple((
            opt(char('-')),
            alt((
                recognize(char('0')),
                recognize(pair(one_of("123456789"), digit0)),
            )),
            opt(recognize(pair(char('.'), cut(digit1)))),
            opt(recognize(tuple((one_of("eE"), opt(one_of("+-")), cut(digit1))))),
        ))),
    )(i)?;

    let integral = !text.contains(['.', 'e', 'E']);
    let num = if integral {
        if let Some(neg) = text.strip_prefix('-') {
            neg.parse::<i128>().map(|n| Number::from(-n)).ok()
        } else {
            text.parse::<u128>().map(Number::from).ok()
        }
    } else {
        None
    };

    match num {
        Some(num) => Ok((rest, num)),
        None => match fast_float::parse::<f64, _>(text) {
            Ok(f) => Ok((rest, Number::from(f))),
            Err(_) => Err(Err::Error(error::make_error(i, ErrorKind::Float))),
        },
    }
}

/// A JSON string literal with the full escape set.
pub(super) fn string<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, String, E> {
    context("string", preceded(char('"'), cut(string_inner)))(i)
}

/// Contents up to and including the closing quote. Raw control characters are rejected,
/// as is an unterminated string.
fn string_inner<'a, E: CxErr<'a>>(full: &'a str) -> IResult<&'a str, String, E> {
    let mut out = String::new();
    let mut rest = full;
    loop {
        let c = match rest.chars().next() {
            Some(c) => c,
            None => return Err(Err::Error(error::make_error(rest, ErrorKind::Eof))),
        };
        match c {
            '"' => return Ok((&rest[1..], out)),
            '\\' => {
                let (r, unescaped) = escape(&rest[1..])?;
                out.push(unescaped);
                rest = r;
            }
            c if (c as u32) < 0x20 => {
                return Err(Err::Error(error::make_error(rest, ErrorKind::Char)));
            }
            c => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
}

/// The character after a backslash.
fn escape<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, char, E> {
    let c = match i.chars().next() {
        Some(c) => c,
        None => return Err(Err::Error(error::make_error(i, ErrorKind::Eof))),
    };
    let rest = &i[c.len_utf8()..];
    let unescaped = match c {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => return unicode_escape(rest),
        _ => return Err(Err::Error(error::make_error(i, ErrorKind::Escaped))),
    };
    Ok((rest, unescaped))
}

/// The four hex digits of a `\uXXXX` escape, pairing surrogates.
///
/// A high surrogate must be followed by a `\uXXXX` low surrogate; lone surrogates have no
/// scalar-value representation and are rejected.
fn unicode_escape<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, char, E> {
    let (rest, unit) = hex4(i)?;
    match unit {
        0xD800..=0xDBFF => {
            let (rest, _) = tag("\\u")(rest)?;
            let (rest, low) = hex4(rest)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(Err::Error(error::make_error(i, ErrorKind::Char)));
            }
            let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            match char::from_u32(scalar) {
                Some(c) => Ok((rest, c)),
                None => Err(Err::Error(error::make_error(i, ErrorKind::Char))),
            }
        }
        0xDC00..=0xDFFF => Err(Err::Error(error::make_error(i, ErrorKind::Char))),
        unit => match char::from_u32(unit) {
            Some(c) => Ok((rest, c)),
            None => Err(Err::Error(error::make_error(i, ErrorKind::Char))),
        },
    }
}

fn hex4<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, u32, E> {
    if i.len() < 4 || !i.is_char_boundary(4) {
        return Err(Err::Error(error::make_error(i, ErrorKind::HexDigit)));
    }
    match u32::from_str_radix(&i[..4], 16) {
        Ok(n) => Ok((&i[4..], n)),
        Err(_) => Err(Err::Error(error::make_error(i, ErrorKind::HexDigit))),
    }
}
