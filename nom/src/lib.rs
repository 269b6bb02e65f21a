pub mod helper;
pub mod model;

use nom::bytes::complete::take_till;
use nom::sequence::preceded;
use nom::IResult;

// -----------------------------------------------------------------------------------------------

/// Tab, LF, CR and space.
pub const CONTROL_CHARS: [char; 4] = ['\t', '\n', '\r', ' '];

pub const QUOTE_CHARS: [char; 2] = ['"', '\''];

pub fn is_control(c: char) -> bool {
    CONTROL_CHARS.contains(&c)
}

pub fn is_quote(c: char) -> bool {
    QUOTE_CHARS.contains(&c)
}

/// Removes leading and trailing control characters.
pub fn trim(value: &str) -> &str {
    value.trim_matches(is_control)
}

// -----------------------------------------------------------------------------------------------

/// Recognizes the leading run of a tag interior up to the first control character.
///
/// The rest of the input is the attribute text of the tag.
pub fn element_name(input: &str) -> IResult<&str, &str> {
    preceded(helper::controls0, take_till(is_control))(input)
}

/// Parses the `key=value` pairs of a tag interior into `attributes`.
///
/// Previously held entries are dropped. Tokens without `=` are ignored.
pub fn attributes(input: &str, attributes: &mut model::Attributes) {
    attributes.clear();

    if let Ok((_, tokens)) = helper::tokens(input) {
        for attr in tokens.into_iter().filter_map(model::Attribute::parse) {
            attributes.insert(attr.name.to_string(), attr.value.to_string());
        }
    }
}

// -----------------------------------------------------------------------------------------------
