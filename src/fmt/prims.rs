use crate::ds::Number;

/// Write a JSON string literal, quotes included.
///
/// Escapes the two mandatory characters and the C0 control range, using the short escapes where
/// JSON has them. Everything else, non-ASCII included, is written through as UTF-8.
pub(crate) fn write_string(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\u{0008}' => buf.push_str("\\b"),
            '\u{000C}' => buf.push_str("\\f"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                buf.push_str("\\u00");
                let n = c as u32;
                buf.push(hex_digit(n >> 4));
                buf.push(hex_digit(n & 0xF));
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}

fn hex_digit(n: u32) -> char {
    char::from_digit(n, 16).unwrap_or('0')
}

/// Write a finite number.
///
/// Integers write as-is. Floats use the shortest round-trip form, forced to keep a fraction or
/// exponent so the text parses back into the float class (`1.0` stays `1.0`, not `1`).
pub(crate) fn write_number(buf: &mut String, num: &Number) {
    match num {
        Number::Uint(n) => buf.push_str(&n.to_string()),
        Number::Int(n) => buf.push_str(&n.to_string()),
        Number::Float(f) => {
            let s = f.to_string();
            let fractional = s.contains(['.', 'e', 'E']);
            buf.push_str(&s);
            if !fractional {
                buf.push_str(".0");
            }
        }
    }
}
