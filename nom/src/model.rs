use crate::is_quote;
use indexmap::IndexMap;

// -----------------------------------------------------------------------------------------------

/// Attribute name to value, in insertion order.
pub type Attributes = IndexMap<String, String>;

// -----------------------------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> Attribute<'a> {
    /// Splits a `key=value` token at its first `=`.
    ///
    /// The surrounding quotes of the value are removed.
    pub fn parse(token: &'a str) -> Option<Self> {
        let (name, value) = token.split_once('=')?;
        if name.is_empty() {
            return None;
        }

        Some(Attribute {
            name,
            value: unquote(value),
        })
    }
}

impl<'a> From<(&'a str, &'a str)> for Attribute<'a> {
    fn from(value: (&'a str, &'a str)) -> Self {
        let (name, value) = value;
        Attribute { name, value }
    }
}

// -----------------------------------------------------------------------------------------------

/// Removes the quote character that opens `value` and the same character if it closes it.
pub fn unquote(value: &str) -> &str {
    match value.chars().next() {
        Some(quote) if is_quote(quote) => {
            let inner = &value[quote.len_utf8()..];
            inner.strip_suffix(quote).unwrap_or(inner)
        }
        _ => value,
    }
}

// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_parse() {
        assert_eq!(
            Some(Attribute::from(("a", "x y"))),
            Attribute::parse("a=\"x y\"")
        );
        assert_eq!(Some(Attribute::from(("b", "q\"r"))), Attribute::parse("b='q\"r'"));
        assert_eq!(Some(Attribute::from(("c", "1=2"))), Attribute::parse("c=1=2"));
        assert_eq!(Some(Attribute::from(("d", ""))), Attribute::parse("d="));
        assert_eq!(None, Attribute::parse("=x"));
        assert_eq!(None, Attribute::parse("plain"));
    }

    #[test]
    fn test_unquote() {
        assert_eq!("abc", unquote("\"abc\""));
        assert_eq!("abc", unquote("'abc'"));
        assert_eq!("abc", unquote("\"abc"));
        assert_eq!("abc'", unquote("\"abc'"));
        assert_eq!("abc", unquote("abc"));
        assert_eq!("", unquote("\""));
        assert_eq!("", unquote(""));
    }
}
