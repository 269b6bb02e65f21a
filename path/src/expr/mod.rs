pub mod model;

use nom::bytes::complete::take_till1;
use nom::character::complete::char;
use nom::multi::many0;
use nom::sequence::preceded;
use nom::IResult;
use nxml_nom::is_control;

// -----------------------------------------------------------------------------------------------

/// Splits `input` into segments.
///
/// Tabs, line breaks and spaces are dropped first. Empty segments are ignored.
pub fn parse(input: &str) -> model::Path {
    let input: String = input.chars().filter(|c| !is_control(*c)).collect();

    let segments = match segments(&input) {
        Ok((_, segments)) => segments.into_iter().map(str::to_string).collect(),
        Err(_) => vec![],
    };

    model::Path::from(segments)
}

fn segments(input: &str) -> IResult<&str, Vec<&str>> {
    many0(preceded(many0(char('/')), take_till1(|c: char| c == '/')))(input)
}

// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn names(input: &str) -> Vec<String> {
        parse(input).segments().to_vec()
    }

    #[test]
    fn test_parse() {
        assert_eq!(vec!["Root", "Items", "Item1"], names("/Root/Items/Item1"));
        assert_eq!(vec!["Root", "Items"], names("Root//Items/"));
        assert_eq!(vec!["Root", "Items"], names(" / Root /\tIt ems "));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("///").is_empty());
        assert!(parse(" \r\n").is_empty());
    }

    #[test]
    fn test_path_display() {
        assert_eq!("/Root/Items", parse("Root//Items").to_string());
        assert_eq!("", parse("/").to_string());
    }

    #[test]
    fn test_path_split_first() {
        let path = parse("/a/b/c");
        let (first, rest) = path.split_first().unwrap();
        assert_eq!("a", first);
        assert_eq!(["b".to_string(), "c".to_string()], rest);
        assert!(parse("/").split_first().is_none());
    }
}
