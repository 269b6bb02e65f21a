pub mod error;
pub mod model;

use model::{TagKind, TAGS, TAG_COUNT};
use nxml_nom::{is_control, is_quote};
use std::collections::VecDeque;
use std::str::Chars;

// -----------------------------------------------------------------------------------------------

/// Character reader over resident text.
///
/// Characters handed back with [`Reader::unread`] form the surplus, which is consumed before
/// the underlying text.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    chars: Chars<'a>,
    surplus: VecDeque<char>,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Reader {
            chars: input.chars(),
            surplus: VecDeque::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.surplus.is_empty() && self.chars.as_str().is_empty()
    }

    pub fn read_char(&mut self) -> Option<char> {
        self.surplus.pop_front().or_else(|| self.chars.next())
    }

    /// Reads the first character that is not a tab, LF, CR or space.
    pub fn read_char_skip_blanks(&mut self) -> Option<char> {
        loop {
            let ch = self.read_char()?;
            if !is_control(ch) {
                return Some(ch);
            }
        }
    }

    pub fn unread(&mut self, value: &str) {
        for ch in value.chars().rev() {
            self.surplus.push_front(ch);
        }
    }

    pub fn unread_char(&mut self, ch: char) {
        self.surplus.push_front(ch);
    }

    /// Determines the kind of tag opened by the `<` just consumed.
    ///
    /// Candidates are dropped as soon as a character disagrees with their pattern. Reading
    /// stops once no candidate needs more characters; the winner is the first fully matched
    /// candidate in table order, and anything read past its pattern goes back to the surplus.
    pub fn read_open_tag(&mut self) -> error::Result<TagKind> {
        let mut live = [true; TAG_COUNT];
        let mut read = String::new();
        let mut offset = 1;

        while TAGS
            .iter()
            .zip(live)
            .any(|(tag, alive)| alive && tag.start.len() > offset)
        {
            let ch = self.read_char().ok_or(error::Error::EndOfInput)?;
            read.push(ch);

            for (tag, alive) in TAGS.iter().zip(live.iter_mut()) {
                if *alive
                    && tag.start.len() > offset
                    && char::from(tag.start.as_bytes()[offset]) != ch
                {
                    *alive = false;
                }
            }

            offset += 1;
        }

        let index = live.iter().position(|alive| *alive).unwrap_or(TAG_COUNT - 1);
        let tag = &TAGS[index];
        self.unread(&read[tag.start.len() - 1..]);

        log::trace!("open tag {:?} ({:?} read ahead)", tag.kind, read);
        Ok(tag.kind)
    }

    /// Reads up to `terminator` and returns the text before it.
    ///
    /// With `skip_quotes`, a terminator inside a `"..."` or `'...'` span does not count.
    pub fn read_until(&mut self, terminator: &str, skip_quotes: bool) -> error::Result<String> {
        let mut value = String::new();
        if terminator.is_empty() {
            return Ok(value);
        }

        let mut quotes = Quotes::default();
        loop {
            let ch = self
                .read_char()
                .ok_or_else(|| error::Error::Unterminated(terminator.to_string()))?;
            value.push(ch);

            let quoted = skip_quotes && quotes.feed(ch);
            if !quoted && value.ends_with(terminator) {
                value.truncate(value.len() - terminator.len());
                return Ok(value);
            }
        }
    }

    /// Reads up to a single-character `terminator` that is not inside a quoted span.
    pub fn read_with_quotes(&mut self, terminator: char) -> error::Result<String> {
        let mut value = String::new();
        let mut quotes = Quotes::default();
        loop {
            let ch = self
                .read_char()
                .ok_or_else(|| error::Error::Unterminated(terminator.to_string()))?;

            if !quotes.feed(ch) && ch == terminator {
                return Ok(value);
            }

            value.push(ch);
        }
    }
}

// -----------------------------------------------------------------------------------------------

/// Tracks whether the characters fed so far end inside a quoted span.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quotes {
    open: Option<char>,
}

impl Quotes {
    /// Returns `true` when `ch` belongs to a quoted span, quote characters included.
    pub fn feed(&mut self, ch: char) -> bool {
        match self.open {
            Some(quote) => {
                if ch == quote {
                    self.open = None;
                }
                true
            }
            None if is_quote(ch) => {
                self.open = Some(ch);
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rest(reader: &mut Reader) -> String {
        let mut value = String::new();
        while let Some(ch) = reader.read_char() {
            value.push(ch);
        }
        value
    }

    fn open_tag(input: &str) -> (error::Result<TagKind>, String) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut reader = Reader::new(input);
        let kind = reader.read_open_tag();
        (kind, rest(&mut reader))
    }

    #[test]
    fn test_read_char() {
        let mut reader = Reader::new("c");
        reader.unread("ab");
        assert!(!reader.is_empty());
        assert_eq!(Some('a'), reader.read_char());
        reader.unread_char('x');
        assert_eq!("xbc", rest(&mut reader));
        assert!(reader.is_empty());
        assert_eq!(None, reader.read_char());
    }

    #[test]
    fn test_read_char_skip_blanks() {
        let mut reader = Reader::new(" \r\n\tx y");
        assert_eq!(Some('x'), reader.read_char_skip_blanks());
        assert_eq!(Some('y'), reader.read_char_skip_blanks());
        assert_eq!(None, reader.read_char_skip_blanks());
    }

    #[test]
    fn test_read_open_tag() {
        assert_eq!(
            (Ok(TagKind::CData), "x]]>".to_string()),
            open_tag("![CDATA[x]]>")
        );
        assert_eq!(
            (Ok(TagKind::DocType), " html>".to_string()),
            open_tag("!DOCTYPE html>")
        );
        assert_eq!(
            (Ok(TagKind::DtdElement), " a (b)>".to_string()),
            open_tag("!ELEMENT a (b)>")
        );
        assert_eq!(
            (Ok(TagKind::DtdAttList), " a b CDATA #IMPLIED>".to_string()),
            open_tag("!ATTLIST a b CDATA #IMPLIED>")
        );
        assert_eq!(
            (Ok(TagKind::DtdEntity), " e 'v'>".to_string()),
            open_tag("!ENTITY e 'v'>")
        );
        assert_eq!(
            (Ok(TagKind::DtdNotation), " n SYSTEM 'x'>".to_string()),
            open_tag("!NOTATION n SYSTEM 'x'>")
        );
        assert_eq!(
            (Ok(TagKind::StyleSheet), " href='a.css'?>".to_string()),
            open_tag("?xml-stylesheet href='a.css'?>")
        );
        assert_eq!(
            (Ok(TagKind::Declaration), " version='1.0'?>".to_string()),
            open_tag("?xml version='1.0'?>")
        );
        assert_eq!(
            (Ok(TagKind::Comment), " c -->".to_string()),
            open_tag("!-- c -->")
        );
        assert_eq!(
            (Ok(TagKind::GenericBang), "[INCLUDE[]]>".to_string()),
            open_tag("![INCLUDE[]]>")
        );
        assert_eq!(
            (Ok(TagKind::GenericQuestion), "pi data?>".to_string()),
            open_tag("?pi data?>")
        );
        assert_eq!(
            (Ok(TagKind::Normal), "root a='b'>".to_string()),
            open_tag("root a='b'>")
        );
    }

    #[test]
    fn test_read_open_tag_mismatch_earlier_char() {
        // '!' rules out every "<?" pattern even though "<!" already matched.
        assert_eq!(
            (Ok(TagKind::GenericBang), "xml-stylesheet a>".to_string()),
            open_tag("!xml-stylesheet a>")
        );
        assert_eq!(
            (Ok(TagKind::GenericBang), "DOCTYPO x>".to_string()),
            open_tag("!DOCTYPO x>")
        );
        // "-f" rules out the stylesheet; the declaration wins and both chars are replayed.
        assert_eq!(
            (Ok(TagKind::Declaration), "-foo a='1'?>".to_string()),
            open_tag("?xml-foo a='1'?>")
        );
    }

    #[test]
    fn test_read_open_tag_end_of_input() {
        assert_eq!((Err(error::Error::EndOfInput), String::new()), open_tag(""));
        assert_eq!(
            (Err(error::Error::EndOfInput), String::new()),
            open_tag("!-")
        );
        assert_eq!((Ok(TagKind::Normal), "a".to_string()), open_tag("a"));
    }

    #[test]
    fn test_read_until() {
        let mut reader = Reader::new(" version=\"1.0\"?>rest");
        assert_eq!(Ok(" version=\"1.0\"".to_string()), reader.read_until("?>", true));
        assert_eq!("rest", rest(&mut reader));

        let mut reader = Reader::new("x]]y]]>z");
        assert_eq!(Ok("x]]y".to_string()), reader.read_until("]]>", false));
        assert_eq!("z", rest(&mut reader));

        let mut reader = Reader::new("");
        assert_eq!(Ok(String::new()), reader.read_until("", false));
    }

    #[test]
    fn test_read_until_quotes() {
        let mut reader = Reader::new("a=\">\" b>x");
        assert_eq!(Ok("a=\">\" b".to_string()), reader.read_until(">", true));
        assert_eq!("x", rest(&mut reader));

        let mut reader = Reader::new("a=\">\" b>x");
        assert_eq!(Ok("a=\"".to_string()), reader.read_until(">", false));

        let mut reader = Reader::new("N b='q\"r'/>");
        assert_eq!(Ok("N b='q\"r'/".to_string()), reader.read_until(">", true));
    }

    #[test]
    fn test_read_until_unterminated() {
        let mut reader = Reader::new("abc");
        assert_eq!(
            Err(error::Error::Unterminated(">".to_string())),
            reader.read_until(">", true)
        );

        let mut reader = Reader::new("a='>");
        assert_eq!(
            Err(error::Error::Unterminated(">".to_string())),
            reader.read_until(">", true)
        );
    }

    #[test]
    fn test_read_with_quotes() {
        let mut reader = Reader::new(" a \"b>c\" 'd>' e>f");
        assert_eq!(
            Ok(" a \"b>c\" 'd>' e".to_string()),
            reader.read_with_quotes('>')
        );
        assert_eq!("f", rest(&mut reader));

        let mut reader = Reader::new(" a \"b>");
        assert_eq!(
            Err(error::Error::Unterminated(">".to_string())),
            reader.read_with_quotes('>')
        );
    }

    #[test]
    fn test_quotes() {
        let mut quotes = Quotes::default();
        assert!(!quotes.feed('a'));
        assert!(quotes.feed('\''));
        assert!(quotes.feed('"'));
        assert!(quotes.is_open());
        assert!(quotes.feed('\''));
        assert!(!quotes.is_open());
        assert!(!quotes.feed('>'));
    }
}
