// -----------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<![CDATA[{data}]]>`
    CData,
    /// `<!DOCTYPE{spec}>`
    DocType,
    /// `<!ELEMENT{spec}>`
    DtdElement,
    /// `<!ATTLIST{spec}>`
    DtdAttList,
    /// `<!ENTITY{spec}>`
    DtdEntity,
    /// `<!NOTATION{spec}>`
    DtdNotation,
    /// `<?xml-stylesheet{stylesheet}?>`
    StyleSheet,
    /// `<?xml{declaration}?>`
    Declaration,
    /// `<!--{comment}-->`
    Comment,
    /// `<!{data}>`
    GenericBang,
    /// `<?{data}?>`
    GenericQuestion,
    /// `<name {attr}>` and `<name {attr}/>`
    Normal,
}

impl TagKind {
    pub fn pattern(&self) -> &'static TagPattern {
        TAGS.iter()
            .find(|v| v.kind == *self)
            .unwrap_or(&TAGS[TAG_COUNT - 1])
    }
}

// -----------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct TagPattern {
    pub start: &'static str,
    pub close: &'static str,
    pub kind: TagKind,
}

pub const TAG_COUNT: usize = 12;

/// Opening patterns, searched in this order.
///
/// A pattern must come before every pattern that is a prefix of it.
pub static TAGS: [TagPattern; TAG_COUNT] = [
    TagPattern {
        start: "<![CDATA[",
        close: "]]>",
        kind: TagKind::CData,
    },
    TagPattern {
        start: "<!DOCTYPE",
        close: ">",
        kind: TagKind::DocType,
    },
    TagPattern {
        start: "<!ELEMENT",
        close: ">",
        kind: TagKind::DtdElement,
    },
    TagPattern {
        start: "<!ATTLIST",
        close: ">",
        kind: TagKind::DtdAttList,
    },
    TagPattern {
        start: "<!ENTITY",
        close: ">",
        kind: TagKind::DtdEntity,
    },
    TagPattern {
        start: "<!NOTATION",
        close: ">",
        kind: TagKind::DtdNotation,
    },
    TagPattern {
        start: "<?xml-stylesheet",
        close: "?>",
        kind: TagKind::StyleSheet,
    },
    TagPattern {
        start: "<?xml",
        close: "?>",
        kind: TagKind::Declaration,
    },
    TagPattern {
        start: "<!--",
        close: "-->",
        kind: TagKind::Comment,
    },
    TagPattern {
        start: "<!",
        close: ">",
        kind: TagKind::GenericBang,
    },
    TagPattern {
        start: "<?",
        close: "?>",
        kind: TagKind::GenericQuestion,
    },
    TagPattern {
        start: "<",
        close: ">",
        kind: TagKind::Normal,
    },
];

// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_prefix_order() {
        for (i, tag) in TAGS.iter().enumerate() {
            for longer in &TAGS[i + 1..] {
                assert!(
                    !longer.start.starts_with(tag.start),
                    "{} must be searched before {}",
                    longer.start,
                    tag.start
                );
            }
        }
    }

    #[test]
    fn test_tag_kind_pattern() {
        assert_eq!("<!--", TagKind::Comment.pattern().start);
        assert_eq!("-->", TagKind::Comment.pattern().close);
        assert_eq!("]]>", TagKind::CData.pattern().close);
        assert_eq!("?>", TagKind::Declaration.pattern().close);
        assert_eq!(">", TagKind::Normal.pattern().close);
    }
}
