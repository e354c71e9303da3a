use super::{Error, Trace};
use nom::error::{VerboseError, VerboseErrorKind};
use std::collections::BTreeMap;
use std::fmt;

impl<'a> Error<'a> {
    pub(super) fn new(src: &'a str, verr: VerboseError<&'a str>) -> Self {
        Self {
            errs: verr
                .errors
                .into_iter()
                .map(|(i, e)| (offset(src, i), e))
                .collect(),
            lines: lines_to_map(src),
            empty_input: src.trim().is_empty(),
        }
    }

    /// Get a [`Trace`] at the hierarchal error index.
    pub fn get(&self, index: usize) -> Option<Trace<'a>> {
        let (offset, ekind) = self.errs.get(index)?;

        let trace = if self.empty_input {
            make_empty_trace(ekind)
        } else {
            let (line_offset, line, linestr) =
                get_line(&self.lines, *offset).expect("not empty input");
            let col = offset.saturating_sub(line_offset);
            let msg = make_trace_msg(linestr, col, ekind);
            let col = col + 1; // col is one-based
            Trace {
                line,
                col,
                linestr,
                msg,
            }
        };

        Some(trace)
    }

    /// Iterate over the error hierarchy, innermost failure first.
    pub fn iter<'i>(&'i self) -> impl Iterator<Item = Trace<'a>> + 'i {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// The number of errors in the error hierarchy.
    pub fn len(&self) -> usize {
        self.errs.len()
    }

    /// Combine the error hierarchy into a backtrace with caret markers.
    ///
    /// # Example
    /// ```rust
    /// let fail = tagson::parse::parse("[1, 2")
    ///     .unwrap_err();
    ///
    /// assert_eq!(
    ///     &fail.backtrace(),
    ///     r##"#0: at 1:6 :: expected ']', found end of input
    /// [1, 2
    ///      ^
    ///
    /// #1: at 1:1 :: in array
    /// [1, 2
    /// ^"##
    /// );
    /// ```
    pub fn backtrace(&self) -> String {
        let mut buf = String::new();

        let last = self.len().saturating_sub(1);
        for (idx, trace) in self.iter().enumerate() {
            buf.push_str(&format!("#{}: {}", idx, trace));
            if idx != last {
                buf.push_str("\n\n");
            }
        }

        buf
    }
}

impl<'a> fmt::Debug for Error<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.backtrace())
    }
}

impl<'a> fmt::Display for Trace<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "at {}:{} :: {}", self.line, self.col, self.msg)?;
        write!(f, "{}", self.linestr)?;
        if self.col > 0 {
            writeln!(f)?;
            for _ in 0..self.col.saturating_sub(1) {
                write!(f, " ")?;
            }
            write!(f, "^")?;
        }

        Ok(())
    }
}

fn offset(src: &str, sub: &str) -> usize {
    (sub.as_ptr() as usize) - (src.as_ptr() as usize)
}

/// Format `(line_offset, line_idx, line)`.
fn get_line<'a>(
    lines: &BTreeMap<usize, (usize, &'a str)>,
    offset: usize,
) -> Option<(usize, usize, &'a str)> {
    lines
        .range(..=offset)
        .last()
        .map(|x| (*x.0, (x.1).0, (x.1).1))
}

/// Line indices are one-based.
fn lines_to_map(src: &str) -> BTreeMap<usize, (usize, &str)> {
    src.lines()
        .enumerate()
        .map(|(idx, line)| (offset(src, line), (idx + 1, line)))
        .collect()
}

fn make_empty_trace(ekind: &VerboseErrorKind) -> Trace<'static> {
    use VerboseErrorKind::*;
    let msg = match ekind {
        Char(c) => format!("expected '{}', got empty input", c),
        Context(s) => format!("in {}, got empty input", s),
        Nom(e) => format!("in {:?}, got empty input", e),
    };

    Trace {
        line: 0,
        col: 0,
        linestr: "",
        msg,
    }
}

fn make_trace_msg(linestr: &str, col: usize, ekind: &VerboseErrorKind) -> String {
    use VerboseErrorKind::*;
    match ekind {
        Char(c) => match linestr[col.min(linestr.len())..].chars().next() {
            Some(found) => format!("expected '{}', found '{}'", c, found),
            None => format!("expected '{}', found end of input", c),
        },
        Context(s) => format!("in {}", s),
        Nom(e) => format!("in {:?}", e),
    }
}
