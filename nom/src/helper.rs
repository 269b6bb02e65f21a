use crate::{is_control, is_quote};
use nom::branch::alt;
use nom::bytes::complete::{take_till, take_till1, take_while, take_while1};
use nom::character::complete::char;
use nom::combinator::{opt, recognize};
use nom::multi::{many0, many1};
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

// -----------------------------------------------------------------------------------------------

pub fn controls0(input: &str) -> IResult<&str, &str> {
    take_while(is_control)(input)
}

pub fn controls1(input: &str) -> IResult<&str, &str> {
    take_while1(is_control)(input)
}

/// '"' [^"]* '"'?
///
/// An unterminated span runs to the end of the input.
pub fn double_quoted(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('"'),
        take_till(|c: char| c == '"'),
        opt(char('"')),
    )))(input)
}

/// "'" [^']* "'"?
pub fn single_quoted(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('\''),
        take_till(|c: char| c == '\''),
        opt(char('\'')),
    )))(input)
}

/// Recognizes a run of characters delimited by control characters.
///
/// Control characters inside a quoted span belong to the run.
pub fn token(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((
        double_quoted,
        single_quoted,
        take_till1(|c: char| is_control(c) || is_quote(c)),
    ))))(input)
}

/// Splits the input into tokens, skipping the control characters between them.
pub fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    terminated(many0(preceded(controls0, token)), controls0)(input)
}

// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls() {
        let (rest, ret) = controls0("a").unwrap();
        assert_eq!("a", rest);
        assert_eq!("", ret);

        let (rest, ret) = controls1(" \t\r\na").unwrap();
        assert_eq!("a", rest);
        assert_eq!(" \t\r\n", ret);

        assert!(controls1("a").is_err());
    }

    #[test]
    fn test_quoted() {
        let (rest, ret) = double_quoted("\"a 'b'\" c").unwrap();
        assert_eq!(" c", rest);
        assert_eq!("\"a 'b'\"", ret);

        let (rest, ret) = single_quoted("'a \"b\"' c").unwrap();
        assert_eq!(" c", rest);
        assert_eq!("'a \"b\"'", ret);

        let (rest, ret) = double_quoted("\"abc").unwrap();
        assert_eq!("", rest);
        assert_eq!("\"abc", ret);

        assert!(double_quoted("'a'").is_err());
    }

    #[test]
    fn test_token() {
        let (rest, ret) = token("a=\"x y\" b").unwrap();
        assert_eq!(" b", rest);
        assert_eq!("a=\"x y\"", ret);

        let (rest, ret) = token("'x y'z w").unwrap();
        assert_eq!(" w", rest);
        assert_eq!("'x y'z", ret);

        assert!(token(" a").is_err());
    }

    #[test]
    fn test_tokens() {
        let (rest, ret) = tokens("  a=1\tb='2 3'\r\nc ").unwrap();
        assert_eq!("", rest);
        assert_eq!(vec!["a=1", "b='2 3'", "c"], ret);

        let (rest, ret) = tokens("").unwrap();
        assert_eq!("", rest);
        assert!(ret.is_empty());
    }
}
