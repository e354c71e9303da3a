use super::*;

/// A run of JSON whitespace: space, tab, carriage return, or line feed.
pub(super) fn whitespace<'a, E: CxErr<'a>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    const CHARS: &str = " \t\r\n";
    take_while(|c| CHARS.contains(c))(i)
}

/// Discards any leading whitespace before matching the parser.
pub(super) fn ignore_whitespace<'a, O, E: CxErr<'a>, F>(
    mut f: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, E>,
{
    move |input: &'a str| {
        let (input, _) = whitespace(input)?;
        f(input)
    }
}
